//! Skill values and server-side skill assignments.

use super::namespace::Namespace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A skill as it appears in a selection option value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Skill {
    /// Plain tag, encoded as the bare string.
    Atom(String),
    /// Namespaced skill, encoded as `{namespace,item}`.
    Expanded { namespace: String, item: String },
}

impl Skill {
    pub fn atom(name: impl Into<String>) -> Self {
        Skill::Atom(name.into())
    }

    pub fn expanded(namespace: Namespace, item: impl Into<String>) -> Self {
        Skill::Expanded {
            namespace: namespace.label().to_string(),
            item: item.into(),
        }
    }

    /// Decode an option value.
    ///
    /// Anything that is not `{namespace,item}` with both parts non-empty is an atom.
    /// The item may itself contain commas; the split happens at the first one.
    pub fn decode(value: &str) -> Self {
        let inner = value
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'));
        if let Some((namespace, item)) = inner.and_then(|inner| inner.split_once(',')) {
            if !namespace.is_empty() && !item.is_empty() {
                return Skill::Expanded {
                    namespace: namespace.to_string(),
                    item: item.to_string(),
                };
            }
        }
        Skill::Atom(value.to_string())
    }

    /// Canonical option value.
    pub fn encode(&self) -> String {
        match self {
            Skill::Atom(name) => name.clone(),
            Skill::Expanded { namespace, item } => format!("{{{},{}}}", namespace, item),
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// One skill grant as reported by the server.
///
/// `expanded` absent, null or empty means a plain atom named `atom`; otherwise the
/// grant is the namespaced skill `{atom,expanded}`. `atom` is optional on the wire
/// so that malformed entries deserialize and simply never match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssignedSkill {
    #[serde(default)]
    pub atom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<String>,
}

impl AssignedSkill {
    pub fn atom(name: impl Into<String>) -> Self {
        Self {
            atom: Some(name.into()),
            expanded: None,
        }
    }

    pub fn expanded(namespace: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            atom: Some(namespace.into()),
            expanded: Some(item.into()),
        }
    }

    fn expansion(&self) -> Option<&str> {
        self.expanded.as_deref().filter(|item| !item.is_empty())
    }

    pub fn is_plain(&self) -> bool {
        self.expansion().is_none()
    }

    /// Plain grant of exactly `name`.
    pub fn grants_atom(&self, name: &str) -> bool {
        self.is_plain() && self.atom.as_deref() == Some(name)
    }

    /// Namespaced grant of exactly `(namespace, item)`.
    pub fn grants_expanded(&self, namespace: &str, item: &str) -> bool {
        self.atom.as_deref() == Some(namespace) && self.expansion() == Some(item)
    }

    /// The skill this grant refers to, if well formed.
    pub fn skill(&self) -> Option<Skill> {
        let atom = self.atom.as_deref().filter(|a| !a.is_empty())?;
        Some(match self.expansion() {
            Some(item) => Skill::Expanded {
                namespace: atom.to_string(),
                item: item.to_string(),
            },
            None => Skill::Atom(atom.to_string()),
        })
    }
}

/// The full assignment of one agent or profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentSet {
    entries: Vec<AssignedSkill>,
}

impl AssignmentSet {
    pub fn new(entries: Vec<AssignedSkill>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[AssignedSkill] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_atom(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.grants_atom(name))
    }

    pub fn contains_expanded(&self, namespace: &str, item: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.grants_expanded(namespace, item))
    }

    pub fn contains(&self, skill: &Skill) -> bool {
        match skill {
            Skill::Atom(name) => self.contains_atom(name),
            Skill::Expanded { namespace, item } => self.contains_expanded(namespace, item),
        }
    }
}

impl From<Vec<AssignedSkill>> for AssignmentSet {
    fn from(entries: Vec<AssignedSkill>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<AssignedSkill> for AssignmentSet {
    fn from_iter<I: IntoIterator<Item = AssignedSkill>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
