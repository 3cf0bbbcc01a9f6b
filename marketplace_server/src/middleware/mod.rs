mod profile;

pub use profile::{ProfileResolverFactory, ProfileResolverService, PROFILE_ID_HEADER};
