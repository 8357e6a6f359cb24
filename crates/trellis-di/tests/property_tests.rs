//! Property-based tests for lifetime policy and multi-binding behavior

use proptest::prelude::*;
use std::sync::Arc;
use trellis_di::*;

trait Tagged: Send + Sync {
    fn tag(&self) -> Option<u32>;
}

/// Seeded registrations carry a tag; constructed ones do not.
struct Tag(Option<u32>);

impl Tagged for Tag {
    fn tag(&self) -> Option<u32> {
        self.0
    }
}

impl Injectable for Tag {
    fn interfaces() -> Interfaces<Self> {
        interfaces![dyn Tagged]
    }
}

impl Component for Tag {
    type Dependencies = ();

    fn construct(_: ()) -> Self {
        Tag(None)
    }
}

#[derive(Debug, Clone)]
enum Registration {
    Transient,
    Singleton,
    Seeded(u32),
}

fn arb_registration() -> impl Strategy<Value = Registration> {
    prop_oneof![
        Just(Registration::Transient),
        Just(Registration::Singleton),
        any::<u32>().prop_map(Registration::Seeded),
    ]
}

fn register(container: &mut Container, registration: &Registration) {
    match registration {
        Registration::Transient => container
            .register_as::<dyn Tagged, Tag>(Lifetime::Transient)
            .unwrap(),
        Registration::Singleton => container
            .register_as::<dyn Tagged, Tag>(Lifetime::Singleton)
            .unwrap(),
        Registration::Seeded(tag) => container
            .register_instance::<dyn Tagged, Tag>(Arc::new(Tag(Some(*tag))))
            .unwrap(),
    }
}

/// resolve_all returns exactly one instance per registration, in order
proptest! {
    #[test]
    fn test_resolve_all_preserves_registration_order(
        registrations in prop::collection::vec(arb_registration(), 1..30)
    ) {
        let mut container = Container::new();
        for registration in &registrations {
            register(&mut container, registration);
        }

        let resolved = container.resolve_all::<dyn Tagged>().unwrap();
        prop_assert_eq!(resolved.len(), registrations.len());

        for (instance, registration) in resolved.iter().zip(&registrations) {
            let expected = match registration {
                Registration::Seeded(tag) => Some(*tag),
                _ => None,
            };
            prop_assert_eq!(instance.tag(), expected);
        }
    }
}

/// Repeated resolve_all shares cached instances and rebuilds transients
proptest! {
    #[test]
    fn test_resolve_all_respects_each_lifetime(
        registrations in prop::collection::vec(arb_registration(), 1..30)
    ) {
        let mut container = Container::new();
        for registration in &registrations {
            register(&mut container, registration);
        }

        let first = container.resolve_all::<dyn Tagged>().unwrap();
        let second = container.resolve_all::<dyn Tagged>().unwrap();

        for ((a, b), registration) in first.iter().zip(&second).zip(&registrations) {
            match registration {
                Registration::Transient => prop_assert!(!Arc::ptr_eq(a, b)),
                _ => prop_assert!(Arc::ptr_eq(a, b)),
            }
        }
    }
}

/// resolve always follows the first registration, whatever follows it
proptest! {
    #[test]
    fn test_resolve_uses_first_registration(
        head in arb_registration(),
        tail in prop::collection::vec(arb_registration(), 0..10),
        resolutions in 2..20usize,
    ) {
        let mut container = Container::new();
        register(&mut container, &head);
        for registration in &tail {
            register(&mut container, registration);
        }

        let resolved: Vec<_> = (0..resolutions)
            .map(|_| container.resolve::<dyn Tagged>().unwrap())
            .collect();

        for instance in &resolved[1..] {
            match head {
                Registration::Transient => prop_assert!(!Arc::ptr_eq(&resolved[0], instance)),
                _ => prop_assert!(Arc::ptr_eq(&resolved[0], instance)),
            }
        }
        if let Registration::Seeded(tag) = head {
            prop_assert_eq!(resolved[0].tag(), Some(tag));
        }
    }
}

/// Lifetime names outside the supported set are always rejected
proptest! {
    #[test]
    fn test_unknown_lifetime_names_rejected(name in "[a-z]{1,12}") {
        prop_assume!(!["transient", "instance", "singleton"].contains(&name.as_str()));
        let parsed = name.parse::<Lifetime>();
        prop_assert!(
            matches!(parsed, Err(DIError::UnsupportedLifetime { .. })),
            "unexpected parse result for {}",
            name
        );
    }
}
