use tourbook_engine::{
    ActivityId, BookingError, Destination, DestinationId, PassengerId, PricingPolicy, Registry,
    Tier, TravelPackage,
};

const EPS: f64 = 1e-9;

fn place(registry: &mut Registry, name: &str) -> DestinationId {
    registry.add_destination(Destination::new(name))
}

fn offer(
    registry: &mut Registry,
    destination: DestinationId,
    name: &str,
    cost: f64,
    capacity: i64,
) -> ActivityId {
    let id = registry
        .create_activity(name, format!("{name} description"), cost, capacity, destination)
        .unwrap();
    registry.attach_activity(destination, id).unwrap();
    id
}

fn balance(registry: &Registry, id: PassengerId) -> f64 {
    registry.passenger(id).unwrap().balance()
}

#[test]
fn roster_accepts_exactly_capacity_sign_ups() {
    for capacity in 0..6 {
        let mut registry = Registry::new();
        let paris = place(&mut registry, "Paris");
        let tour = offer(&mut registry, paris, "Tour", 10.0, capacity);
        let mut successes = 0;
        for n in 0..10 {
            let who = registry.register_passenger(format!("P{n}"), 0.0, Tier::Normal);
            if registry.sign_up_passenger(tour, who).is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, capacity);
        let tour = registry.activity(tour).unwrap();
        assert_eq!(tour.capacity(), 0);
        assert_eq!(tour.signed_up_passengers().len(), usize::try_from(capacity).unwrap());
    }
}

#[test]
fn negative_capacity_never_accepts() {
    let mut registry = Registry::new();
    let paris = place(&mut registry, "Paris");
    let tour = offer(&mut registry, paris, "Tour", 10.0, -5);
    let who = registry.register_passenger("John Doe", 100.0, Tier::Gold);
    assert!(matches!(
        registry.sign_up_passenger(tour, who),
        Err(BookingError::CapacityExhausted { .. })
    ));
    assert!(matches!(
        registry.sign_up_for_activity(who, tour),
        Err(BookingError::CapacityExhausted { .. })
    ));
    assert_eq!(
        registry.destination_activity_details(paris).unwrap(),
        "- Tour at Paris (Capacity: 0, Available Spaces: 0, Cost: 10.0)\n"
    );
}

#[test]
fn destination_cost_is_base_plus_truncated_activity_costs() {
    let mut registry = Registry::new();
    let rome = registry.add_destination(Destination::with_cost("Rome", 25));
    for cost in [10.4, 10.4, 10.4] {
        offer(&mut registry, rome, "Walk", cost, 3);
    }
    // 25 -> 35 (35.4) -> 45 (45.4) -> 55 (55.4)
    assert_eq!(registry.destination(rome).unwrap().cost(), 55);
    assert_eq!(registry.destination(rome).unwrap().activities().len(), 3);
}

#[test]
fn normal_passenger_pays_list_price() {
    let mut registry = Registry::new();
    let paris = place(&mut registry, "Paris");
    let tour = offer(&mut registry, paris, "Eiffel Tower Tour", 50.0, 20);
    let john = registry.register_passenger("John Doe", 100.0, Tier::Normal);

    let receipt = registry.sign_up_for_activity(john, tour).unwrap();
    assert_eq!(
        receipt.to_string(),
        "John Doe (NORMAL) signed up for Eiffel Tower Tour at Paris for a cost of 50.0"
    );
    assert!((balance(&registry, john) - 50.0).abs() < EPS);
    assert_eq!(registry.passenger(john).unwrap().signed_up_activities(), &[tour]);
    assert_eq!(registry.activity(tour).unwrap().capacity(), 19);
}

#[test]
fn normal_passenger_cannot_overspend() {
    let mut registry = Registry::new();
    let paris = place(&mut registry, "Paris");
    let tour = offer(&mut registry, paris, "Eiffel Tower Tour", 150.0, 20);
    let john = registry.register_passenger("John Doe", 100.0, Tier::Normal);

    let err = registry.sign_up_for_activity(john, tour).unwrap_err();
    assert_eq!(
        err,
        BookingError::InsufficientBalance {
            required: 150.0,
            available: 100.0
        }
    );
    assert!((balance(&registry, john) - 100.0).abs() < EPS);
    assert!(registry.passenger(john).unwrap().signed_up_activities().is_empty());
    assert_eq!(registry.activity(tour).unwrap().capacity(), 20);
}

#[test]
fn silver_passenger_pays_ninety_percent() {
    let mut registry = Registry::new();
    let paris = place(&mut registry, "Paris");
    let mut package = TravelPackage::new("Paris Tour", 20);
    package.add_destination(&registry, paris).unwrap();
    let tour = offer(&mut registry, paris, "Eiffel Tower Tour", 50.0, 20);
    let silver = registry.register_passenger("Silver Member", 100.0, Tier::Silver);

    let receipt = registry.sign_up_for_activity(silver, tour).unwrap();
    assert!((receipt.charged - 45.0).abs() < EPS);
    assert!((balance(&registry, silver) - 55.0).abs() < EPS);
    assert_eq!(registry.passenger(silver).unwrap().signed_up_activities(), &[tour]);
}

#[test]
fn silver_passenger_cannot_cover_discounted_price() {
    let mut registry = Registry::new();
    let paris = place(&mut registry, "Paris");
    let tour = offer(&mut registry, paris, "Eiffel Tower Tour", 150.0, 20);
    let silver = registry.register_passenger("Silver Member", 100.0, Tier::Silver);

    assert!(registry.sign_up_for_activity(silver, tour).is_err());
    assert!((balance(&registry, silver) - 100.0).abs() < EPS);
    assert!(registry.passenger(silver).unwrap().signed_up_activities().is_empty());
}

#[test]
fn gold_passenger_signs_up_for_free() {
    let mut registry = Registry::new();
    let paris = place(&mut registry, "Paris");
    let tour = offer(&mut registry, paris, "Eiffel Tower Tour", 5_000.0, 20);
    let gold = registry.register_passenger("Premium Member", 100.0, Tier::Gold);

    let receipt = registry.sign_up_for_activity(gold, tour).unwrap();
    assert_eq!(
        receipt.to_string(),
        "Premium Member (GOLD) signed up for Eiffel Tower Tour at Paris for a discounted cost of 0"
    );
    assert!((balance(&registry, gold) - 100.0).abs() < EPS);
    assert_eq!(registry.passenger(gold).unwrap().signed_up_activities(), &[tour]);
}

#[test]
fn passenger_numbers_increase_across_tiers() {
    let mut registry = Registry::new();
    let ids = [Tier::Normal, Tier::Gold, Tier::Silver, Tier::Normal]
        .into_iter()
        .enumerate()
        .map(|(n, tier)| registry.register_passenger(format!("P{n}"), 0.0, tier))
        .collect::<Vec<_>>();
    let numbers: Vec<u64> = ids
        .iter()
        .map(|id| registry.passenger(*id).unwrap().number())
        .collect();
    assert_eq!(numbers, vec![0, 1, 2, 3]);
}

#[test]
fn package_accepts_passenger_into_empty_itinerary() {
    let mut registry = Registry::new();
    let mut package = TravelPackage::new("Europe Tour", 2);
    let paris = place(&mut registry, "Paris");
    package.add_destination(&registry, paris).unwrap();
    assert_eq!(package.itinerary().len(), 1);

    let john = registry.register_passenger("John Doe", 100.0, Tier::Normal);
    package.add_passenger(&mut registry, john).unwrap();
    assert_eq!(package.passengers().len(), 1);
    assert!(registry.passenger(john).unwrap().signed_up_activities().is_empty());
}

#[test]
fn package_enrollment_signs_up_for_every_activity() {
    let mut registry = Registry::new();
    let mut package = TravelPackage::new("Europe Tour", 2);
    let paris = place(&mut registry, "Paris");
    offer(&mut registry, paris, "Eiffel Tower Tour", 50.0, 1);
    package.add_destination(&registry, paris).unwrap();

    let john = registry.register_passenger("John Doe", 100.0, Tier::Normal);
    package.add_passenger(&mut registry, john).unwrap();
    assert_eq!(registry.passenger(john).unwrap().signed_up_activities().len(), 1);
}

#[test]
fn full_package_turns_passengers_away() {
    let mut registry = Registry::new();
    let mut package = TravelPackage::new("Europe Tour", 1);
    let paris = place(&mut registry, "Paris");
    offer(&mut registry, paris, "Eiffel Tower Tour", 50.0, 2);
    package.add_destination(&registry, paris).unwrap();

    let john = registry.register_passenger("John Doe", 100.0, Tier::Normal);
    let jane = registry.register_passenger("Jane Doe", 150.0, Tier::Normal);
    package.add_passenger(&mut registry, john).unwrap();
    assert!(matches!(
        package.add_passenger(&mut registry, jane),
        Err(BookingError::PackageFull { capacity: 1, .. })
    ));
    assert_eq!(package.passengers(), &[john]);
    assert!(registry.passenger(jane).unwrap().signed_up_activities().is_empty());
}

#[test]
fn zero_capacity_package_is_always_full() {
    let mut registry = Registry::new();
    let mut package = TravelPackage::new("Closed Tour", 0);
    let gold = registry.register_passenger("Gold", 1_000.0, Tier::Gold);
    assert!(package.add_passenger(&mut registry, gold).is_err());
    assert!(package.passengers().is_empty());
}

#[test]
fn enrollment_counts_activities_across_the_itinerary() {
    let mut registry = Registry::new();
    let mut package = TravelPackage::new("Grand Tour", 5);
    let paris = place(&mut registry, "Paris");
    let rome = place(&mut registry, "Rome");
    offer(&mut registry, paris, "Louvre", 20.0, 1);
    offer(&mut registry, paris, "Seine", 15.0, 0);
    offer(&mut registry, rome, "Colosseum", 25.0, 4);
    package.add_destination(&registry, paris).unwrap();
    package.add_destination(&registry, rome).unwrap();

    let first = registry.register_passenger("First", 500.0, Tier::Gold);
    let second = registry.register_passenger("Second", 500.0, Tier::Gold);
    let enrollment = package.add_passenger(&mut registry, first).unwrap();
    assert_eq!(enrollment.activities_joined, 3);
    assert_eq!(enrollment.full_rosters.len(), 1);
    let enrollment = package.add_passenger(&mut registry, second).unwrap();
    assert_eq!(enrollment.full_rosters.len(), 2);
    assert_eq!(registry.passenger(second).unwrap().signed_up_activities().len(), 3);
}

#[test]
fn activities_attached_after_itinerary_join_enrollment_but_not_base_cost() {
    let mut registry = Registry::new();
    let mut package = TravelPackage::new("Paris Tour", 2);
    let paris = place(&mut registry, "Paris");
    offer(&mut registry, paris, "Louvre", 20.0, 5);
    package.add_destination(&registry, paris).unwrap();
    assert_eq!(package.base_cost(), 40);

    let cruise = offer(&mut registry, paris, "Seine Cruise", 35.0, 5);
    assert_eq!(package.base_cost(), 40);

    let gold = registry.register_passenger("Gold", 100.0, Tier::Gold);
    let enrollment = package.add_passenger(&mut registry, gold).unwrap();
    assert_eq!(enrollment.total_cost, 40);
    assert_eq!(enrollment.activities_joined, 2);
    assert!(registry.passenger(gold).unwrap().signed_up_activities().contains(&cruise));
    assert_eq!(registry.activity(cruise).unwrap().signed_up_passengers(), &[gold]);
}

#[test]
fn one_policy_prices_both_sign_ups_and_enrollment() {
    let policy = PricingPolicy {
        silver_rate: 0.5,
        ..PricingPolicy::default()
    };
    let mut registry = Registry::with_policy(policy);
    let mut package = TravelPackage::new("Paris Tour", 2);
    let paris = place(&mut registry, "Paris");
    let tour = offer(&mut registry, paris, "Eiffel Tower Tour", 100.0, 10);
    package.add_destination(&registry, paris).unwrap();
    assert_eq!(package.base_cost(), 200);

    let silver = registry.register_passenger("Silver Member", 500.0, Tier::Silver);
    let enrollment = package.add_passenger(&mut registry, silver).unwrap();
    assert_eq!(enrollment.total_cost, 100);
    assert_eq!(
        package.calculate_total_cost(&registry, registry.passenger(silver).unwrap()),
        100
    );

    let receipt = registry.sign_up_for_activity(silver, tour).unwrap();
    assert!((receipt.charged - 50.0).abs() < EPS);
}

#[test]
fn both_enrollment_paths_stack_without_deduplication() {
    let mut registry = Registry::new();
    let mut package = TravelPackage::new("Paris Tour", 2);
    let paris = place(&mut registry, "Paris");
    let tour = offer(&mut registry, paris, "Eiffel Tower Tour", 50.0, 10);
    package.add_destination(&registry, paris).unwrap();
    let john = registry.register_passenger("John Doe", 100.0, Tier::Normal);

    package.add_passenger(&mut registry, john).unwrap();
    registry.sign_up_for_activity(john, tour).unwrap();

    assert_eq!(registry.passenger(john).unwrap().signed_up_activities(), &[tour, tour]);
    let tour = registry.activity(tour).unwrap();
    assert_eq!(tour.capacity(), 8);
    assert_eq!(tour.signed_up_passengers(), &[john]);
    assert_eq!(tour.configured_capacity(), 10);
}

#[test]
fn total_for_all_passengers_tracks_current_state() {
    let mut registry = Registry::new();
    let mut package = TravelPackage::new("Europe Tour", 4);
    let paris = place(&mut registry, "Paris");
    offer(&mut registry, paris, "Eiffel Tower Tour", 50.0, 20);
    package.add_destination(&registry, paris).unwrap();

    let normal = registry.register_passenger("N", 10.0, Tier::Normal);
    let silver = registry.register_passenger("S", 95.0, Tier::Silver);
    let gold = registry.register_passenger("G", 100.0, Tier::Gold);
    for id in [normal, silver, gold] {
        package.add_passenger(&mut registry, id).unwrap();
    }
    let expected: i64 = package
        .passengers()
        .iter()
        .map(|id| package.calculate_total_cost(&registry, registry.passenger(*id).unwrap()))
        .sum();
    assert_eq!(expected, 90 + 100);
    assert_eq!(package.calculate_total_cost_for_all_passengers(&registry), expected);
}
