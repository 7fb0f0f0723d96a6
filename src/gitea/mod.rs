//! Gitea API module, also serving Forgejo (API-compatible).
pub(crate) mod forge;
pub(crate) mod repo;

/// Page size for repository listing
const GITEA_PER_PAGE: usize = 50;
