pub mod builders;

pub use builders::{mocked_roles, RoleBuilder, RolesBuilder};
