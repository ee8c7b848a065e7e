//! End-to-end reactive behavior: computed fields re-resolve when watched
//! inputs change, and teardown stops all recomputation.

use std::rc::Rc;

use headsync::config::{SeoDefaults, SeoDescriptor};
use headsync::orchestrator::run;
use headsync::plugin::{MountOptions, SeoPlugin};
use headsync::reactive::Input;
use headsync::sink::Namespace;
use headsync::value::{FieldGroup, FieldValue, GroupValue, ResolvedField, TitleValue};

use super::test_utils::{as_sink, harness, ready_route};

#[test]
fn test_computed_field_tracks_reactive_input() {
    let (reactor, ctx, head) = harness(ready_route("home", None));
    let description = Input::new(&reactor, "first".to_string());

    let description2 = description.clone();
    let mut og = FieldGroup::new();
    og.insert(
        "description".to_string(),
        FieldValue::computed(move |eval| {
            Ok(ResolvedField::Text(eval.watch(&description2)))
        }),
    );
    ctx.update(ready_route(
        "home",
        Some(SeoDescriptor {
            title: Some(TitleValue::from("Home")),
            og: Some(og),
            ..SeoDescriptor::default()
        }),
    ));

    run(&ctx, &Rc::new(SeoDefaults::default()), &as_sink(&head));
    assert_eq!(
        head.entry(Namespace::Property, "og:description"),
        Some("first".to_string())
    );

    description.set("second".to_string());
    assert_eq!(
        head.entry(Namespace::Property, "og:description"),
        Some("second".to_string())
    );
}

#[test]
fn test_computed_meta_group_tracks_input() {
    let (reactor, ctx, head) = harness(ready_route("home", None));
    let robots = Input::new(&reactor, "index".to_string());

    let robots2 = robots.clone();
    ctx.update(ready_route(
        "home",
        Some(SeoDescriptor {
            title: Some(TitleValue::from("Home")),
            meta: Some(GroupValue::computed(move |eval| {
                let mut fields = FieldGroup::new();
                fields.insert("robots".to_string(), eval.watch(&robots2).into());
                Ok(fields)
            })),
            ..SeoDescriptor::default()
        }),
    ));

    run(&ctx, &Rc::new(SeoDefaults::default()), &as_sink(&head));
    assert_eq!(
        head.entry(Namespace::Name, "robots"),
        Some("index".to_string())
    );

    robots.set("noindex".to_string());
    assert_eq!(
        head.entry(Namespace::Name, "robots"),
        Some("noindex".to_string())
    );
}

#[test]
fn test_teardown_stops_dynamic_recomputation() {
    let (reactor, ctx, head) = harness(ready_route("home", None));
    let description = Input::new(&reactor, "live".to_string());

    let description2 = description.clone();
    let mut twitter = FieldGroup::new();
    twitter.insert(
        "description".to_string(),
        FieldValue::computed(move |eval| {
            Ok(ResolvedField::Text(eval.watch(&description2)))
        }),
    );
    ctx.update(ready_route(
        "home",
        Some(SeoDescriptor {
            title: Some(TitleValue::from("Home")),
            twitter: Some(twitter),
            ..SeoDescriptor::default()
        }),
    ));

    let plugin = SeoPlugin::mount(MountOptions::default(), as_sink(&head));
    plugin.after_action(&ctx);
    assert_eq!(
        head.entry(Namespace::Name, "twitter:description"),
        Some("live".to_string())
    );

    plugin.on_stop(&ctx);
    description.set("stale".to_string());
    assert_eq!(
        head.entry(Namespace::Name, "twitter:description"),
        Some("live".to_string())
    );
}

#[test]
fn test_title_suffix_inheritance_end_to_end() {
    let (_reactor, ctx, head) = harness(ready_route(
        "home",
        Some(SeoDescriptor {
            title: Some(TitleValue::from_json(serde_json::json!({
                "text": "Home",
                "suffix": "MySite"
            }))),
            ..SeoDescriptor::default()
        }),
    ));

    run(
        &ctx,
        &Rc::new(SeoDefaults {
            separator: Some("·".to_string()),
            ..SeoDefaults::default()
        }),
        &as_sink(&head),
    );
    assert_eq!(head.var("title"), Some("Home · MySite".to_string()));
    assert_eq!(
        head.entry(Namespace::Name, "twitter:title"),
        Some("Home".to_string())
    );
    assert_eq!(
        head.entry(Namespace::Property, "og:title"),
        Some("Home".to_string())
    );
}

#[test]
fn test_shared_description_inherited_across_groups() {
    let (_reactor, ctx, head) = harness(ready_route(
        "home",
        Some(SeoDescriptor {
            title: Some(TitleValue::from("Home")),
            description: Some("Shared description".into()),
            og: Some(FieldGroup::new()),
            twitter: Some(FieldGroup::new()),
            meta: Some(GroupValue::Fields(FieldGroup::new())),
            ..SeoDescriptor::default()
        }),
    ));

    run(&ctx, &Rc::new(SeoDefaults::default()), &as_sink(&head));
    assert_eq!(
        head.entry(Namespace::Property, "og:description"),
        Some("Shared description".to_string())
    );
    assert_eq!(
        head.entry(Namespace::Name, "twitter:description"),
        Some("Shared description".to_string())
    );
    assert_eq!(
        head.entry(Namespace::Name, "description"),
        Some("Shared description".to_string())
    );
}
