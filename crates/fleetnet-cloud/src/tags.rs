//! Tag construction for created resources

use crate::model::{NAME_TAG, Tag};

/// Tag identifying resources created by fleetnet
pub const MANAGED_BY_TAG: &str = "managed-by";
pub const MANAGED_BY_VALUE: &str = "fleetnet";

/// Build the tag list for a new resource: `Name` (when `name` is non-empty),
/// the managed-by marker, then `extra`. A `Name` entry in `extra` loses to
/// `name`.
pub fn build_tags(extra: &[Tag], name: &str) -> Vec<Tag> {
    let mut tags = Vec::with_capacity(extra.len() + 2);

    if !name.is_empty() {
        tags.push(Tag::new(NAME_TAG, name));
    }
    tags.push(Tag::new(MANAGED_BY_TAG, MANAGED_BY_VALUE));

    tags.extend(
        extra
            .iter()
            .filter(|t| t.key != NAME_TAG && t.key != MANAGED_BY_TAG)
            .cloned(),
    );

    tags
}
