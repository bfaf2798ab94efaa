//! Identity outbound adapters.

mod userinfo;

pub use userinfo::UserInfoIdentityProvider;
