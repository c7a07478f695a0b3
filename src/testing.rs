// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures to avoid duplication.

#![doc(hidden)]

use crate::types::{Category, Coordinates, Establishment, Governorate, RecordStore};

/// Create a record with just an id and a name. Every other field is empty.
pub fn make_record(id: &str, name: &str) -> Establishment {
    Establishment {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

/// Create a fully populated record.
#[allow(clippy::too_many_arguments)]
pub fn make_full_record(
    id: &str,
    name: &str,
    category: Category,
    subcategory: &str,
    address: &str,
    governorate: Governorate,
    services: &[&str],
    rating: f32,
) -> Establishment {
    Establishment {
        id: id.to_string(),
        name: name.to_string(),
        category,
        subcategory: subcategory.to_string(),
        address: address.to_string(),
        governorate,
        services: services.iter().map(|s| s.to_string()).collect(),
        rating,
        ..Default::default()
    }
}

/// The single-record catalog used by the end-to-end scenario.
pub fn clinique_pasteur() -> Establishment {
    Establishment {
        id: "1".to_string(),
        name: "Clinique Pasteur".to_string(),
        category: Category::Sante,
        subcategory: "Médecin généraliste".to_string(),
        address: "12 Avenue Habib Bourguiba Tunis".to_string(),
        services: vec!["Consultation".to_string(), "Urgences".to_string()],
        governorate: Governorate::Tunis,
        phone: "+216 71 000 000".to_string(),
        rating: 4.5,
        review_count: 87,
        coordinates: Coordinates {
            lat: 36.8008,
            lng: 10.1800,
        },
        verified: true,
        ..Default::default()
    }
}

/// Small mixed catalog covering several categories and governorates.
pub fn sample_records() -> Vec<Establishment> {
    let mut records = vec![clinique_pasteur()];
    records.push(make_full_record(
        "2",
        "Cabinet Dentaire El Menzah",
        Category::Sante,
        "Dentiste",
        "Rue Ibn Khaldoun El Menzah",
        Governorate::Tunis,
        &["Orthodontie", "Urgences dentaires"],
        4.2,
    ));
    records.push(make_full_record(
        "3",
        "Hotel Les Oliviers Palace",
        Category::Hotel,
        "Hotel 5 etoiles",
        "Route de la Corniche Sfax",
        Governorate::Sfax,
        &["free parking", "Piscine", "Wifi gratuit"],
        4.7,
    ));
    records.push(make_full_record(
        "4",
        "Boulangerie Sfaxienne",
        Category::Alimentation,
        "Boulangerie patisserie",
        "Rue Habib Maazoun",
        Governorate::Sfax,
        &["Pain traditionnel"],
        3.9,
    ));
    records.push(make_full_record(
        "5",
        "Taxi Ariana Express",
        Category::Taxi,
        "Taxi collectif",
        "Rue de Marseille Ariana",
        Governorate::Ariana,
        &["Aeroport", "Nuit"],
        3.1,
    ));
    let mut museum = make_full_record(
        "6",
        "Musee du Bardo",
        Category::Cultural,
        "Musee national",
        "Route de Bizerte Le Bardo",
        Governorate::Manouba,
        &["Visites guidees", "Boutique"],
        4.8,
    );
    museum.premium = true;
    museum.verified = true;
    records.push(museum);
    records
}

/// [`sample_records`] as a fresh store snapshot.
pub fn sample_store() -> RecordStore {
    RecordStore::new(sample_records())
}
