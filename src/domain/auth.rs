/// Who is calling the data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// No or unknown bearer token: public reads only.
    Anonymous,
    /// Presented one of the configured administrator tokens.
    Administrator,
}

impl Viewer {
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Administrator)
    }
}
