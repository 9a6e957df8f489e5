/// The view runtime the session components drive.
pub trait SessionHost: Send + Sync {
    fn navigate(&self, path: &str);

    /// Blocking, user-visible notice.
    fn alert(&self, message: &str);
}
