use std::path::PathBuf;

use launchkit::test_support::{Event, LaunchHarness};
use launchkit::{LaunchError, LaunchPaths, PlatformVariant, ProcessEnvironment, VariantOptions};

fn env_set(event: &Event) -> bool {
    matches!(event, Event::EnvSet { key, .. } if key == "PYTHONPATH")
}

fn application_created(event: &Event) -> bool {
    matches!(event, Event::ApplicationCreated { .. })
}

fn property(name: &str, value: bool) -> (String, bool) {
    (name.to_owned(), value)
}

#[test]
fn environment_is_exported_before_the_host_exists() {
    for variant in [PlatformVariant::Integrated, PlatformVariant::Generic] {
        let outcome = LaunchHarness::builder().with_variant(variant).build().run();
        outcome.result.unwrap();

        let env = outcome.journal.position(env_set).unwrap();
        let app = outcome.journal.position(application_created).unwrap();
        assert!(env < app, "{variant}: PYTHONPATH must be set before the application");
        assert_eq!(env, 0, "{variant}: the environment write comes first");
    }
}

#[test]
fn integrated_host_receives_augmented_arguments() {
    let outcome = LaunchHarness::builder()
        .with_variant(PlatformVariant::Integrated)
        .with_args(&["app"])
        .build()
        .run();
    outcome.result.unwrap();

    assert_eq!(
        outcome.journal.application_args().unwrap(),
        ["app", "-d", "jolla"]
    );
}

#[test]
fn generic_host_receives_arguments_unchanged() {
    let outcome = LaunchHarness::builder()
        .with_variant(PlatformVariant::Generic)
        .with_args(&["app", "--set-zl", "15"])
        .build()
        .run();
    outcome.result.unwrap();

    assert_eq!(
        outcome.journal.application_args().unwrap(),
        ["app", "--set-zl", "15"]
    );
}

#[test]
fn generic_root_is_made_visible_and_flagged_before_exec() {
    let outcome = LaunchHarness::builder()
        .with_variant(PlatformVariant::Generic)
        .build()
        .run();
    outcome.result.unwrap();

    assert_eq!(
        outcome.journal.properties(),
        [property("visible", true), property("nativeLauncher", true)]
    );
    let last_property = outcome
        .journal
        .position(|e| matches!(e, Event::PropertySet { name, .. } if name == "nativeLauncher"))
        .unwrap();
    let exec = outcome.journal.position(|e| *e == Event::Exec).unwrap();
    assert!(last_property < exec);
}

#[test]
fn integrated_root_item_is_flagged_before_the_view_is_shown() {
    let outcome = LaunchHarness::builder()
        .with_variant(PlatformVariant::Integrated)
        .build()
        .run();
    outcome.result.unwrap();

    // the platform view shows itself, so only the capability flag is set
    assert_eq!(
        outcome.journal.properties(),
        [property("nativeLauncher", true)]
    );
    let flagged = outcome
        .journal
        .position(|e| matches!(e, Event::PropertySet { .. }))
        .unwrap();
    let shown = outcome.journal.position(|e| *e == Event::ViewShown).unwrap();
    let exec = outcome.journal.position(|e| *e == Event::Exec).unwrap();
    assert!(flagged < shown);
    assert!(shown < exec);
    assert!(!outcome.journal.events().contains(&Event::EngineCreated));
}

#[test]
fn generic_variant_never_creates_a_view() {
    let outcome = LaunchHarness::builder()
        .with_variant(PlatformVariant::Generic)
        .build()
        .run();
    outcome.result.unwrap();

    let events = outcome.journal.events();
    assert!(events.contains(&Event::EngineCreated));
    assert!(!events.contains(&Event::ViewCreated));
    assert!(!events.contains(&Event::ViewShown));
}

#[test]
fn empty_root_list_is_a_startup_failure() {
    for variant in [PlatformVariant::Integrated, PlatformVariant::Generic] {
        let outcome = LaunchHarness::builder()
            .with_variant(variant)
            .with_roots(0)
            .build()
            .run();

        let err = outcome.result.unwrap_err();
        assert!(
            matches!(err, LaunchError::MissingRoot { variant: v, .. } if v == variant),
            "{variant}: unexpected error {err}"
        );
        assert!(outcome.journal.properties().is_empty());
        assert!(!outcome.journal.events().contains(&Event::Exec));
    }
}

#[test]
fn only_the_first_root_object_is_flagged() {
    let outcome = LaunchHarness::builder()
        .with_variant(PlatformVariant::Generic)
        .with_roots(3)
        .build()
        .run();
    outcome.result.unwrap();

    assert_eq!(outcome.journal.properties().len(), 2);
}

#[test]
fn per_variant_options_are_honoured() {
    let outcome = LaunchHarness::builder()
        .with_variant(PlatformVariant::Integrated)
        .with_variant_options(
            PlatformVariant::Integrated,
            VariantOptions {
                force_visible: true,
                device: None,
            },
        )
        .build()
        .run();
    outcome.result.unwrap();

    assert_eq!(outcome.journal.application_args().unwrap(), ["app"]);
    assert_eq!(
        outcome.journal.properties(),
        [property("visible", true), property("nativeLauncher", true)]
    );
}

#[test]
fn end_to_end_generic_startup() {
    let outcome = LaunchHarness::builder()
        .with_paths(LaunchPaths::compose(
            "/opt/libs",
            "/opt/libs",
            "ui_controls",
            "/opt/app/main.qml",
        ))
        .with_variant(PlatformVariant::Generic)
        .with_exit_code(42)
        .build()
        .run();

    assert_eq!(outcome.result.unwrap(), 42);
    assert_eq!(
        outcome.environment.var("PYTHONPATH").as_deref(),
        Some("/opt/libs")
    );
    assert_eq!(
        outcome.journal.events(),
        vec![
            Event::EnvSet {
                key: "PYTHONPATH".to_owned(),
                value: "/opt/libs".to_owned(),
            },
            Event::ApplicationCreated {
                args: vec!["app".to_owned()],
            },
            Event::EngineCreated,
            Event::ImportPathAdded(PathBuf::from("/opt/libs/ui_controls")),
            Event::DocumentLoaded("/opt/app/main.qml".to_owned()),
            Event::PropertySet {
                name: "visible".to_owned(),
                value: true,
            },
            Event::PropertySet {
                name: "nativeLauncher".to_owned(),
                value: true,
            },
            Event::Exec,
        ]
    );
}

#[test]
fn end_to_end_integrated_startup() {
    let outcome = LaunchHarness::builder()
        .with_variant(PlatformVariant::Integrated)
        .with_exit_code(5)
        .build()
        .run();

    assert_eq!(outcome.result.unwrap(), 5);
    assert_eq!(
        outcome.journal.events(),
        vec![
            Event::EnvSet {
                key: "PYTHONPATH".to_owned(),
                value: "/opt/libs".to_owned(),
            },
            Event::ApplicationCreated {
                args: vec!["app".to_owned(), "-d".to_owned(), "jolla".to_owned()],
            },
            Event::ViewCreated,
            Event::ImportPathAdded(PathBuf::from("/opt/libs/ui_controls")),
            Event::SourceSet("/opt/app/main.qml".to_owned()),
            Event::PropertySet {
                name: "nativeLauncher".to_owned(),
                value: true,
            },
            Event::ViewShown,
            Event::Exec,
        ]
    );
}
