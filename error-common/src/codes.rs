// Error codes implementation
// This module contains standardized error codes for Rolegate

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
}

pub mod authentication {
    pub const INVALID_CREDENTIALS: &str = "AUTH_2001";
    pub const TOKEN_INVALID: &str = "AUTH_2002";
}

pub mod registration {
    pub const IDENTITY_CREATION_FAILED: &str = "REG_3001";
    pub const PROFILE_CREATION_FAILED: &str = "REG_3002";
}

pub mod profile {
    pub const PROFILE_NOT_FOUND: &str = "PROFILE_4001";
}

pub mod system {
    pub const CONFIGURATION: &str = "SYS_9001";
    pub const INTERNAL: &str = "SYS_9002";
}
