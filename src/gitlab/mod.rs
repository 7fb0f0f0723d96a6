//! GitLab API module.
pub(crate) mod forge;
pub(crate) mod repo;

/// Token header used by the GitLab API
const GITLAB_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Page size for project listing
const GITLAB_PER_PAGE: usize = 100;
