//! Conversions between EC2 SDK types and fleetnet-cloud models

use aws_sdk_ec2::types::{
    Filter, IpPermission, IpRange, ResourceType, SecurityGroup as Ec2SecurityGroup,
    Subnet as Ec2Subnet, Tag as Ec2Tag, TagSpecification, Vpc,
};
use fleetnet_cloud::model::{NAME_TAG, name_from_tags};
use fleetnet_cloud::{FirewallRule, Network, Protocol, SecurityGroup, Subnet, Tag};

pub(crate) fn name_filter(name: &str) -> Filter {
    Filter::builder()
        .name(format!("tag:{}", NAME_TAG))
        .values(name)
        .build()
}

pub(crate) fn filter(name: &str, value: &str) -> Filter {
    Filter::builder().name(name).values(value).build()
}

fn tags_from_ec2(tags: &[Ec2Tag]) -> Vec<Tag> {
    tags.iter()
        .filter_map(|t| match (t.key(), t.value()) {
            (Some(key), Some(value)) => Some(Tag::new(key, value)),
            _ => None,
        })
        .collect()
}

pub(crate) fn tag_specification(resource_type: ResourceType, tags: &[Tag]) -> TagSpecification {
    let tags = tags
        .iter()
        .map(|t| Ec2Tag::builder().key(&t.key).value(&t.value).build())
        .collect();
    TagSpecification::builder()
        .resource_type(resource_type)
        .set_tags(Some(tags))
        .build()
}

pub(crate) fn network_from_vpc(vpc: &Vpc) -> Network {
    let tags = tags_from_ec2(vpc.tags());
    Network {
        id: vpc.vpc_id().unwrap_or_default().to_string(),
        name: name_from_tags(&tags),
        cidr_block: vpc.cidr_block().unwrap_or_default().to_string(),
        is_default: vpc.is_default().unwrap_or(false),
        ipv6_cidr_block: vpc
            .ipv6_cidr_block_association_set()
            .iter()
            .find_map(|a| a.ipv6_cidr_block())
            .map(str::to_string),
        tags,
    }
}

pub(crate) fn subnet_from_ec2(subnet: &Ec2Subnet) -> Subnet {
    let tags = tags_from_ec2(subnet.tags());
    Subnet {
        id: subnet.subnet_id().unwrap_or_default().to_string(),
        network_id: subnet.vpc_id().unwrap_or_default().to_string(),
        cidr_block: subnet.cidr_block().unwrap_or_default().to_string(),
        default_for_az: subnet.default_for_az().unwrap_or(false),
        availability_zone: subnet.availability_zone().map(str::to_string),
        name: name_from_tags(&tags),
        tags,
    }
}

pub(crate) fn security_group_from_ec2(group: &Ec2SecurityGroup) -> SecurityGroup {
    SecurityGroup {
        id: group.group_id().unwrap_or_default().to_string(),
        name: group.group_name().unwrap_or_default().to_string(),
        network_id: group.vpc_id().unwrap_or_default().to_string(),
        ingress: group
            .ip_permissions()
            .iter()
            .flat_map(rules_from_permission)
            .collect(),
    }
}

/// Expand one permission into a rule per IPv4 range.
///
/// Only TCP/UDP port ranges are modelled; "all traffic" and ICMP entries are
/// dropped.
fn rules_from_permission(permission: &IpPermission) -> Vec<FirewallRule> {
    let Some(protocol) = permission.ip_protocol().and_then(Protocol::from_wire) else {
        return Vec::new();
    };
    let port = |p: Option<i32>| p.and_then(|p| u16::try_from(p).ok());
    let (Some(from_port), Some(to_port)) = (port(permission.from_port()), port(permission.to_port()))
    else {
        return Vec::new();
    };

    permission
        .ip_ranges()
        .iter()
        .filter_map(|r| r.cidr_ip())
        .map(|cidr| FirewallRule {
            protocol,
            from_port,
            to_port,
            source_cidr: cidr.to_string(),
        })
        .collect()
}

pub(crate) fn ip_permission(rule: &FirewallRule) -> IpPermission {
    IpPermission::builder()
        .ip_protocol(rule.protocol.as_str())
        .from_port(i32::from(rule.from_port))
        .to_port(i32::from(rule.to_port))
        .ip_ranges(IpRange::builder().cidr_ip(&rule.source_cidr).build())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::VpcIpv6CidrBlockAssociation;
    use fleetnet_cloud::model::OPEN_TO_ALL;

    fn ec2_tag(key: &str, value: &str) -> Ec2Tag {
        Ec2Tag::builder().key(key).value(value).build()
    }

    #[test]
    fn test_network_from_vpc() {
        let vpc = Vpc::builder()
            .vpc_id("vpc-0abc")
            .cidr_block("10.0.0.0/16")
            .is_default(true)
            .tags(ec2_tag("Name", "my-vpc"))
            .tags(ec2_tag("team", "infra"))
            .ipv6_cidr_block_association_set(
                VpcIpv6CidrBlockAssociation::builder()
                    .ipv6_cidr_block("2600:1f18::/56")
                    .build(),
            )
            .build();

        let network = network_from_vpc(&vpc);
        assert_eq!(network.id, "vpc-0abc");
        assert_eq!(network.name.as_deref(), Some("my-vpc"));
        assert!(network.is_default);
        assert_eq!(network.ipv6_cidr_block.as_deref(), Some("2600:1f18::/56"));
        assert_eq!(network.tags.len(), 2);
    }

    #[test]
    fn test_untagged_vpc_has_no_name() {
        let vpc = Vpc::builder().vpc_id("vpc-1").cidr_block("172.31.0.0/16").build();

        let network = network_from_vpc(&vpc);
        assert!(network.name.is_none());
        assert!(!network.is_default);
        assert!(network.ipv6_cidr_block.is_none());
    }

    #[test]
    fn test_subnet_from_ec2() {
        let subnet = Ec2Subnet::builder()
            .subnet_id("subnet-1")
            .vpc_id("vpc-1")
            .cidr_block("10.0.0.0/24")
            .default_for_az(true)
            .availability_zone("ap-northeast-1a")
            .tags(ec2_tag("Name", "app"))
            .build();

        let subnet = subnet_from_ec2(&subnet);
        assert_eq!(subnet.network_id, "vpc-1");
        assert!(subnet.default_for_az);
        assert_eq!(subnet.name.as_deref(), Some("app"));
    }

    #[test]
    fn test_security_group_ingress_keeps_tcp_and_udp_only() {
        let group = Ec2SecurityGroup::builder()
            .group_id("sg-1")
            .group_name("web-sg")
            .vpc_id("vpc-1")
            .ip_permissions(
                IpPermission::builder()
                    .ip_protocol("tcp")
                    .from_port(80)
                    .to_port(80)
                    .ip_ranges(IpRange::builder().cidr_ip(OPEN_TO_ALL).build())
                    .build(),
            )
            .ip_permissions(IpPermission::builder().ip_protocol("-1").build())
            .ip_permissions(
                IpPermission::builder()
                    .ip_protocol("icmp")
                    .from_port(-1)
                    .to_port(-1)
                    .ip_ranges(IpRange::builder().cidr_ip(OPEN_TO_ALL).build())
                    .build(),
            )
            .build();

        let group = security_group_from_ec2(&group);
        assert_eq!(group.network_id, "vpc-1");
        assert_eq!(
            group.ingress,
            vec![FirewallRule {
                protocol: Protocol::Tcp,
                from_port: 80,
                to_port: 80,
                source_cidr: OPEN_TO_ALL.to_string(),
            }]
        );
    }

    #[test]
    fn test_ip_permission_from_rule() {
        let rule = FirewallRule {
            protocol: Protocol::Udp,
            from_port: 8000,
            to_port: 8010,
            source_cidr: OPEN_TO_ALL.to_string(),
        };

        let permission = ip_permission(&rule);
        assert_eq!(permission.ip_protocol(), Some("udp"));
        assert_eq!(permission.from_port(), Some(8000));
        assert_eq!(permission.to_port(), Some(8010));
        assert_eq!(permission.ip_ranges()[0].cidr_ip(), Some(OPEN_TO_ALL));
    }

    #[test]
    fn test_tag_specification_carries_all_tags() {
        let spec = tag_specification(
            ResourceType::Vpc,
            &[Tag::new("Name", "my-vpc"), Tag::new("managed-by", "fleetnet")],
        );
        assert_eq!(spec.resource_type(), Some(&ResourceType::Vpc));
        assert_eq!(spec.tags().len(), 2);
        assert_eq!(spec.tags()[0].value(), Some("my-vpc"));
    }
}
