//! GitHub API module.
pub(crate) mod forge;
pub(crate) mod repo;

/// GitHub public host
const GITHUB_DOMAIN: &str = "github.com";

/// GitHub public API host
const GITHUB_API_HOST: &str = "api.github.com";

/// GitHub API Header
const GITHUB_API_HEADER: &str = "X-GitHub-Api-Version";

/// GitHub API Version
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub media type for the v3 REST API
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Page size for repository listing (GitHub caps per_page at 100)
const GITHUB_PER_PAGE: usize = 100;
