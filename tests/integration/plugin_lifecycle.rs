//! Mount, lifecycle hook, and teardown behavior of the plugin surface.

use headsync::config::{SeoDefaults, SeoDescriptor};
use headsync::plugin::{MountOptions, SeoPlugin};
use headsync::sink::{Namespace, OG_PREFIX};
use headsync::value::TitleValue;

use super::test_utils::{as_sink, harness, ready_route};

fn titled(text: &str) -> SeoDescriptor {
    SeoDescriptor {
        title: Some(TitleValue::from(text)),
        ..SeoDescriptor::default()
    }
}

#[test]
fn test_mount_bootstraps_prefix_and_default_title() {
    let (_reactor, _ctx, head) = harness(ready_route("home", None));
    let options = MountOptions {
        defaults: SeoDefaults {
            descriptor: titled("MySite"),
            ..SeoDefaults::default()
        },
        ..MountOptions::default()
    };
    let _plugin = SeoPlugin::mount(options, as_sink(&head));

    assert_eq!(head.prefix(), Some(OG_PREFIX.to_string()));
    assert_eq!(head.var("title"), Some("MySite".to_string()));
}

#[test]
fn test_mount_seeds_computed_default_title() {
    let (_reactor, _ctx, head) = harness(ready_route("home", None));
    let options = MountOptions {
        defaults: SeoDefaults {
            descriptor: SeoDescriptor {
                title: Some(TitleValue::computed(|_| {
                    Ok(TitleValue::Text("MySite".to_string()))
                })),
                ..SeoDescriptor::default()
            },
            ..SeoDefaults::default()
        },
        ..MountOptions::default()
    };
    let _plugin = SeoPlugin::mount(options, as_sink(&head));

    assert_eq!(head.var("title"), Some("MySite".to_string()));
}

#[test]
fn test_after_action_applies_route_metadata() {
    let (_reactor, ctx, head) = harness(ready_route("home", Some(titled("Home"))));
    let plugin = SeoPlugin::mount(MountOptions::default(), as_sink(&head));

    plugin.after_action(&ctx);
    assert_eq!(head.var("title"), Some("Home".to_string()));
    assert_eq!(
        head.entry(Namespace::Property, "og:url"),
        Some("https://example.com/home".to_string())
    );
}

#[test]
fn test_not_ready_context_produces_no_writes() {
    let (_reactor, ctx, head) = harness(headsync::context::RouteState {
        ready: false,
        name: "home".to_string(),
        href: "https://example.com/home".to_string(),
        seo: Some(titled("Home")),
    });
    let plugin = SeoPlugin::mount(MountOptions::default(), as_sink(&head));

    plugin.after_action(&ctx);
    assert!(head.is_empty());
    assert!(head.var("title").is_none());
    assert!(ctx.registry().is_empty());
}

#[test]
fn test_once_check_runs_body_once_per_context() {
    let (_reactor, ctx, head) = harness(ready_route("home", Some(titled("Home"))));
    let plugin = SeoPlugin::mount(MountOptions::default(), as_sink(&head));

    plugin.after_action(&ctx);
    plugin.after_action(&ctx);
    plugin.after_action(&ctx);
    // One computation started, however many times the hook fired.
    assert_eq!(ctx.registry().len(), 1);

    // A fresh context gets its own run.
    let (_reactor2, other, _head2) = harness(ready_route("home", Some(titled("Home"))));
    plugin.after_action(&other);
    assert_eq!(other.registry().len(), 1);
}

#[test]
fn test_skip_once_check_reapplies_every_invocation() {
    let (_reactor, ctx, head) = harness(ready_route("home", Some(titled("Home"))));
    let options = MountOptions {
        defaults: SeoDefaults {
            skip_once_check: true,
            ..SeoDefaults::default()
        },
        ..MountOptions::default()
    };
    let plugin = SeoPlugin::mount(options, as_sink(&head));

    plugin.after_action(&ctx);
    plugin.after_action(&ctx);
    assert_eq!(ctx.registry().len(), 2);
    assert_eq!(head.var("title"), Some("Home".to_string()));
}

#[test]
fn test_only_and_except_filters() {
    let (_reactor, ctx, head) = harness(ready_route("admin", Some(titled("Admin"))));
    let plugin = SeoPlugin::mount(
        MountOptions {
            except: vec!["admin".to_string()],
            ..MountOptions::default()
        },
        as_sink(&head),
    );
    plugin.after_action(&ctx);
    assert!(ctx.registry().is_empty());

    let (_reactor2, home, head2) = harness(ready_route("home", Some(titled("Home"))));
    let plugin2 = SeoPlugin::mount(
        MountOptions {
            only: Some(vec!["blog".to_string()]),
            ..MountOptions::default()
        },
        as_sink(&head2),
    );
    plugin2.after_action(&home);
    assert!(home.registry().is_empty());
}

#[test]
fn test_reapply_is_idempotent() {
    let (_reactor, ctx, head) = harness(ready_route("home", Some(titled("Home"))));
    let options = MountOptions {
        defaults: SeoDefaults {
            skip_once_check: true,
            ..SeoDefaults::default()
        },
        ..MountOptions::default()
    };
    let plugin = SeoPlugin::mount(options, as_sink(&head));

    plugin.after_action(&ctx);
    let first = head.entries();
    plugin.after_action(&ctx);
    assert_eq!(head.entries(), first);
}

#[test]
fn test_on_stop_tears_down_computations() {
    let (_reactor, ctx, head) = harness(ready_route("home", Some(titled("Home"))));
    let plugin = SeoPlugin::mount(MountOptions::default(), as_sink(&head));

    plugin.after_action(&ctx);
    assert_eq!(ctx.registry().len(), 1);

    plugin.on_stop(&ctx);
    assert!(ctx.registry().is_empty());

    // A stopped computation never fires again, even when its dependencies
    // change afterwards.
    ctx.update(ready_route("about", Some(titled("About"))));
    assert_eq!(head.var("title"), Some("Home".to_string()));

    // Repeated stop is a no-op.
    plugin.on_stop(&ctx);
    assert!(ctx.registry().is_empty());
}
