/// The relation of a segment to an event point.
///
/// A segment starts at an event ([`Role::Left`]), ends at one
/// ([`Role::Right`]), or merely passes through its interior
/// ([`Role::Interior`]). A segment id may appear with `Left` at most once
/// and `Right` at most once across a whole event set, but with `Interior`
/// any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Left,
    Right,
    Interior,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Left => "left",
            Role::Right => "right",
            Role::Interior => "interior",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
