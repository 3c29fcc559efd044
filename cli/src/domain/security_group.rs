//! Network access control: ingress rules and the group that bundles them.

use std::fmt;

use crate::domain::constants::ANY_IPV4_CIDR;

/// IP protocol of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    /// Every protocol; written as `-1` in templates.
    All,
}

impl Protocol {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::All => "-1",
        }
    }
}

/// Protocol plus port range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port {
    pub protocol: Protocol,
    pub from: Option<u16>,
    pub to: Option<u16>,
}

impl Port {
    #[must_use]
    pub fn tcp(port: u16) -> Self {
        Self {
            protocol: Protocol::Tcp,
            from: Some(port),
            to: Some(port),
        }
    }

    #[must_use]
    pub fn all_traffic() -> Self {
        Self {
            protocol: Protocol::All,
            from: None,
            to: None,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.protocol, self.from, self.to) {
            (Protocol::All, _, _) => f.write_str("ALL TRAFFIC"),
            (p, Some(from), Some(to)) if from == to => {
                write!(f, "{}/{from}", p.as_str().to_uppercase())
            }
            (p, Some(from), Some(to)) => {
                write!(f, "{}/{from}-{to}", p.as_str().to_uppercase())
            }
            (p, _, _) => write!(f, "{}/ALL", p.as_str().to_uppercase()),
        }
    }
}

/// Traffic source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Peer {
    Ipv4(String),
}

impl Peer {
    #[must_use]
    pub fn any_ipv4() -> Self {
        Self::Ipv4(ANY_IPV4_CIDR.to_string())
    }

    #[must_use]
    pub fn cidr(&self) -> &str {
        match self {
            Self::Ipv4(cidr) => cidr,
        }
    }
}

/// One inbound traffic allowance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    pub peer: Peer,
    pub port: Port,
    pub description: String,
}

/// Security group definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGroup {
    pub name: String,
    pub description: String,
    pub vpc_id: String,
    pub allow_all_outbound: bool,
    ingress: Vec<AccessRule>,
}

impl AccessGroup {
    #[must_use]
    pub fn new(name: &str, description: &str, vpc_id: &str, allow_all_outbound: bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            vpc_id: vpc_id.to_string(),
            allow_all_outbound,
            ingress: Vec::new(),
        }
    }

    /// Append an ingress rule. An identical rule already present is not added again.
    pub fn add_ingress_rule(&mut self, peer: Peer, port: Port, description: &str) {
        let rule = AccessRule {
            peer,
            port,
            description: description.to_string(),
        };
        if !self.ingress.contains(&rule) {
            self.ingress.push(rule);
        }
    }

    #[must_use]
    pub fn ingress_rules(&self) -> &[AccessRule] {
        &self.ingress
    }

    /// Ports opened by the ingress rules, in declaration order.
    #[must_use]
    pub fn ingress_ports(&self) -> Vec<u16> {
        self.ingress.iter().filter_map(|r| r.port.from).collect()
    }
}
