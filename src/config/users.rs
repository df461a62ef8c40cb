//! Builtin demo accounts.
//!
//! These are starter credentials only: override them with a `users.json`
//! file next to the binary before exposing the tool to a team.

pub struct UserEntry {
    pub username: &'static str,
    /// SHA-256 of the password, lowercase hex.
    pub password_hash: &'static str,
    pub role: &'static str,
}

pub const BUILTIN_USERS: &[UserEntry] = &[
    UserEntry {
        username: "admin",
        // "Quartz#Admin9"
        password_hash: "fc4f3700a15dbf728fe22991e3d8a7afa4ad05ef3bb431c53281b5a48784dbac",
        role: "admin",
    },
    UserEntry {
        username: "trader",
        // "Quartz#Trade7"
        password_hash: "bdb684f1bff5c011e046768ad86fa44113be9b461716ef871871ce036fcaeca1",
        role: "trader",
    },
    UserEntry {
        username: "analyst",
        // "Quartz#Scan3"
        password_hash: "59892943416d724cc3e3c5f92d5b197b6bbd3d5cc4a7e5cf62ed86cc8533941b",
        role: "analyst",
    },
];
