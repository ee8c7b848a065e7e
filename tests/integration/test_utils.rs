//! Shared helpers for integration tests.

use std::rc::Rc;

use headsync::config::SeoDescriptor;
use headsync::context::{NavContext, RouteState};
use headsync::reactive::Reactor;
use headsync::sink::{DocumentHead, MetaSink};

/// A ready route snapshot for `name` carrying `seo`.
pub fn ready_route(name: &str, seo: Option<SeoDescriptor>) -> RouteState {
    RouteState {
        ready: true,
        name: name.to_string(),
        href: format!("https://example.com/{name}"),
        seo,
    }
}

/// Fresh reactor, context, and readable sink.
pub fn harness(initial: RouteState) -> (Reactor, Rc<NavContext>, Rc<DocumentHead>) {
    let reactor = Reactor::new();
    let ctx = NavContext::new(&reactor, initial);
    let head = Rc::new(DocumentHead::new());
    (reactor, ctx, head)
}

pub fn as_sink(head: &Rc<DocumentHead>) -> Rc<dyn MetaSink> {
    head.clone()
}
