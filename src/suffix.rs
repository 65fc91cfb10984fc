//! Registrable-domain lookup against a public suffix list.
//!
//! [`WebUrl::top_private_domain`] consults a process-wide [`SuffixList`].
//! By default that is the list bundled with the [`psl`] crate; tests and
//! embedders can [`install`] their own before first use.
//!
//! [`WebUrl::top_private_domain`]: crate::WebUrl::top_private_domain

use once_cell::sync::OnceCell;

/// A source of public-suffix knowledge.
pub trait SuffixList: Send + Sync {
    /// Returns the registrable domain of an ASCII-canonical `host`: the
    /// shortest suffix that is one label below a public suffix. Returns
    /// `None` when `host` is itself a public suffix or carries no known
    /// suffix at all.
    fn registrable_domain(&self, host: &str) -> Option<String>;
}

struct BundledList;

impl SuffixList for BundledList {
    fn registrable_domain(&self, host: &str) -> Option<String> {
        psl::domain_str(host).map(str::to_owned)
    }
}

static ACTIVE: OnceCell<Box<dyn SuffixList>> = OnceCell::new();

/// Installs the process-wide suffix list. The first installation wins and
/// later calls return the rejected list; looking a domain up beforehand
/// installs the bundled default.
pub fn install(list: Box<dyn SuffixList>) -> Result<(), Box<dyn SuffixList>> {
    ACTIVE.set(list)
}

pub(crate) fn registrable_domain(host: &str) -> Option<String> {
    ACTIVE
        .get_or_init(|| Box::new(BundledList))
        .registrable_domain(host)
}
