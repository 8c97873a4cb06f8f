/// Downstream cache/view invalidation. Fire-and-forget: implementations must
/// not block the caller and never report failure back.
pub trait ViewInvalidator: Send + Sync {
    fn invalidate(&self, path: &str);
}
