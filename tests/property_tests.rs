/// Property-based tests using proptest
/// Invariants of filtering, upload validation, gallery navigation and the form
use customer_desk::customer_form::{CustomerForm, FormField};
use customer_desk::customer_list::{filter_customers, matches_search, FilterType};
use customer_desk::gallery::ImageGallery;
use customer_desk::models::{Customer, CustomerImage};
use customer_desk::upload::{remaining_slots, validate_files, SelectedFile, MAX_IMAGES};
use proptest::prelude::*;
use serde_json::json;

fn customer(id: i64, name: &str, is_lead: bool) -> Customer {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "email": format!("c{}@example.com", id),
        "phoneNumber": format!("555-{:04}", id),
        "address": "1 Main St",
        "isLead": is_lead,
        "createdAt": "2024-01-01T00:00:00",
        "updatedAt": "2024-01-01T00:00:00"
    }))
    .unwrap()
}

fn image(id: i64) -> CustomerImage {
    serde_json::from_value(json!({
        "id": id,
        "customerId": 1,
        "imageData": "data:image/png;base64,aGk=",
        "uploadedAt": "2024-01-01T00:00:00"
    }))
    .unwrap()
}

fn customers_strategy() -> impl Strategy<Value = Vec<Customer>> {
    prop::collection::vec(("[A-Za-z ]{1,12}", any::<bool>()), 0..20).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, lead))| customer(i as i64 + 1, &name, lead))
            .collect()
    })
}

// Property: the toggle and the search box compose as an intersection
proptest! {
    #[test]
    fn leads_filter_is_exactly_the_lead_subset(customers in customers_strategy()) {
        let visible = filter_customers(&customers, FilterType::Leads, "");
        let expected: Vec<i64> = customers.iter().filter(|c| c.is_lead).map(|c| c.id).collect();
        let ids: Vec<i64> = visible.iter().map(|c| c.id).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn filter_and_search_intersect(
        customers in customers_strategy(),
        term in "[a-zA-Z]{0,3}",
        filter in prop_oneof![
            Just(FilterType::All),
            Just(FilterType::Leads),
            Just(FilterType::Customers)
        ]
    ) {
        let visible = filter_customers(&customers, filter, &term);
        for c in &customers {
            let expected = filter.matches(c) && matches_search(c, &term);
            prop_assert_eq!(visible.iter().any(|v| v.id == c.id), expected);
        }
    }

    #[test]
    fn search_ignores_case_for_names(customers in customers_strategy(), term in "[a-z]{1,3}") {
        let lower = filter_customers(&customers, FilterType::All, &term);
        let upper = filter_customers(&customers, FilterType::All, &term.to_uppercase());
        prop_assert_eq!(lower.len(), upper.len());
    }
}

// Property: upload validation never exceeds the per-customer cap
proptest! {
    #[test]
    fn accepted_never_exceeds_remaining_slots(
        current in 0usize..15,
        sizes in prop::collection::vec(0usize..64, 0..15)
    ) {
        let files = sizes
            .iter()
            .enumerate()
            .map(|(i, size)| SelectedFile::new(format!("{}.png", i), "image/png", vec![0; *size]))
            .collect();
        let result = validate_files(files, current);
        prop_assert!(result.accepted.len() <= remaining_slots(current));
        prop_assert!(current.min(MAX_IMAGES) + result.accepted.len() <= MAX_IMAGES);
    }

    #[test]
    fn unsupported_types_never_accepted(content_type in "[a-z]{1,8}/[a-z]{1,8}") {
        let file = SelectedFile::new("f", content_type.clone(), vec![1]);
        let result = validate_files(vec![file], 0);
        let supported = customer_desk::upload::ALLOWED_CONTENT_TYPES.contains(&content_type.as_str());
        prop_assert_eq!(result.accepted.len(), usize::from(supported));
    }
}

// Property: the viewer index stays valid through navigation and removal
proptest! {
    #[test]
    fn gallery_selection_stays_in_bounds(
        count in 1i64..12,
        start in 0usize..12,
        steps in prop::collection::vec(0u8..3, 0..30)
    ) {
        let mut gallery = ImageGallery::new((1..=count).map(image).collect());
        gallery.open(start % count as usize);

        for (n, step) in steps.into_iter().enumerate() {
            match step {
                0 => gallery.next(),
                1 => gallery.prev(),
                _ => {
                    if let Some(id) = gallery.images().get(n % gallery.len().max(1)).map(|i| i.id) {
                        gallery.remove(id);
                    }
                }
            }
            match gallery.selected_index() {
                Some(i) => prop_assert!(i < gallery.len()),
                None => prop_assert!(gallery.is_empty()),
            }
        }
    }
}

// Property: form input handling never panics
proptest! {
    #[test]
    fn set_field_and_validate_never_panic(raw in "\\PC*") {
        let mut form = CustomerForm::new();
        for field in FormField::ALL {
            form.set_field(field, &raw);
        }
        let _ = form.validate();
        let _ = form.submit();
    }
}
