//! One-time passcode port

/// Produces numeric one-time passcodes
pub trait OtpGenerator: Send + Sync {
    /// Generate a passcode with `length` digits
    fn generate(&self, length: usize) -> String;
}
