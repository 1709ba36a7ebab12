#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Teller,
}

/// Top-level mode switch between the two flows. The roles share nothing:
/// a payload only travels between them as a rendered and captured image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleShell {
    active: Option<Role>,
}

impl RoleShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Role> {
        self.active
    }

    pub fn select(&mut self, role: Role) {
        self.active = Some(role);
    }

    /// Back to the role selection screen.
    pub fn switch_role(&mut self) {
        self.active = None;
    }
}
