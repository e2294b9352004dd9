mod credentials;

pub use credentials::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, TOKEN_KEY, USER_ID_KEY,
    USER_INFO_KEY, USER_PHONE_KEY,
};
