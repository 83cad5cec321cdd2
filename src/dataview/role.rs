use serde::{Deserialize, Serialize};

/// Semantic role a column plays in a visual.
///
/// The set is closed: role resolution happens once, during extraction, and
/// everything downstream branches on these tags rather than probing
/// string-keyed role maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Category,
    Series,
    X,
    Y,
    Size,
    Gradient,
}

impl Role {
    const ALL: [Role; 6] = [
        Role::Category,
        Role::Series,
        Role::X,
        Role::Y,
        Role::Size,
        Role::Gradient,
    ];

    #[must_use]
    fn bit(self) -> u8 {
        match self {
            Role::Category => 1 << 0,
            Role::Series => 1 << 1,
            Role::X => 1 << 2,
            Role::Y => 1 << 3,
            Role::Size => 1 << 4,
            Role::Gradient => 1 << 5,
        }
    }
}

/// Set of roles attached to one column. Multiple roles may co-occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleSet(u8);

impl RoleSet {
    #[must_use]
    pub fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn of(role: Role) -> Self {
        Self(role.bit())
    }

    #[must_use]
    pub fn with(mut self, role: Role) -> Self {
        self.0 |= role.bit();
        self
    }

    #[must_use]
    pub fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// A column tagged `Gradient` without `Y` feeds color only and is
    /// excluded from the value pipeline.
    #[must_use]
    pub fn is_gradient_only(self) -> bool {
        self.contains(Role::Gradient) && !self.contains(Role::Y)
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |role| self.contains(*role))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), RoleSet::with)
    }
}
