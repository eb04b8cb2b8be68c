//! Fixed one-time passcodes

use crate::domain::ports::OtpGenerator;

pub const DEFAULT_OTP_CODE: &str = "1234";

/// [`OtpGenerator`] that always returns the same code, whatever the length
#[derive(Debug, Clone)]
pub struct FixedOtp {
    code: String,
}

impl FixedOtp {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Default for FixedOtp {
    fn default() -> Self {
        Self::new(DEFAULT_OTP_CODE)
    }
}

impl OtpGenerator for FixedOtp {
    fn generate(&self, _length: usize) -> String {
        self.code.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_requested_length() {
        let otp = FixedOtp::default();

        assert_eq!(otp.generate(4), "1234");
        assert_eq!(otp.generate(6), "1234");
    }

    #[test]
    fn custom_code() {
        assert_eq!(FixedOtp::new("000000").generate(6), "000000");
    }
}
