// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Shipped rule tables. Users can override them through `heuristics.json`.

use crate::{Theme, ThemeRule};

fn rule(theme: Theme, keywords: &[&str]) -> ThemeRule {
    ThemeRule {
        theme,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// Priority order matters: a "Buddhist Pilgrimage" tour is Pilgrimage, not Spiritual,
/// and a "Bali Honeymoon" is Romantic, not International.
pub fn default_theme_rules() -> Vec<ThemeRule> {
    vec![
        rule(
            Theme::Pilgrimage,
            &[
                "yatra",
                "dham",
                "pilgrim",
                "temple",
                "holy",
                "shrine",
                "darshan",
                "jyotirlinga",
            ],
        ),
        rule(
            Theme::Heritage,
            &[
                "rajasthan",
                "palace",
                "fort",
                "heritage",
                "royal",
                "golden triangle",
            ],
        ),
        rule(
            Theme::Wellness,
            &["yoga", "meditation", "wellness", "ayurveda"],
        ),
        rule(
            Theme::Wildlife,
            &[
                "wildlife",
                "safari",
                "national park",
                "jungle",
                "corbett",
                "ranthambore",
            ],
        ),
        rule(Theme::Romantic, &["honeymoon", "romantic"]),
        rule(
            Theme::Beach,
            &["beach", "island", "andaman", "goa", "maldives"],
        ),
        rule(
            Theme::Adventure,
            &["adventure", "trek", "ladakh", "himachal"],
        ),
        rule(
            Theme::Spiritual,
            &[
                "buddhist",
                "circuit",
                "lumbini",
                "bodhgaya",
                "sarnath",
                "kushinagar",
            ],
        ),
        rule(Theme::HelicopterTours, &["helicopter"]),
        rule(Theme::GroupTours, &["group"]),
        rule(
            Theme::International,
            &[
                "vietnam",
                "thailand",
                "singapore",
                "malaysia",
                "dubai",
                "bali",
                "egypt",
                "sri lanka",
                "nepal",
                "bhutan",
                "japan",
                "mauritius",
                "europe",
                "turkey",
                "hong kong",
                "macau",
                "phuket",
                "pattaya",
                "bangkok",
                "koh samui",
                "colombo",
                "kuala lumpur",
            ],
        ),
    ]
}

pub const DEFAULT_NOISE_PATTERNS: &[&str] = &[
    // Site chrome
    r"^India Tour Packages \| Ministry Approved \| Namaste India Trip$",
    r"^Ministry of Tourism,$",
    r"^MENUMENUIndia Tours$",
    r"^International Tours$",
    r"^Group ToursHelicopter ToursPilgrimage ToursBuddhist ToursHoneymoon ToursCustomer Center$",
    r"^Top Trending Tour Packages$",
    r"^Our Popular India Tour Packages$",
    r"^Book International Tour Packages From India$",
    r"^View Tour$",
    r"^View More Packages$",
    r"^Choose Your Style of Tour$",
    r"^Recognized by Ministry",
    // Tab and card headers that repeat a real listing's name
    r"^Chardham Yatra from Delhi$",
    r"^Chardham Yatra by Helicopter$",
    r"^Uttar Pradesh Tour Package$",
    r"^Madhya Pradesh Tour$",
    r"^Sri Lanka Ramayana Tour$",
    r"^Singapore Malaysia Tour$",
    r"^Thailand Tour Package$",
    r"^Dubai Tour Package$",
    r"^Bali Honeymoon Tour$",
    r"^Ujjain Omkareshwar Tour$",
    r"^Jagannath Puri Tour$",
    r"^Dwarka Somnath Tour$",
    // Category banners
    r"^India Tour Packages$",
    r"^Uttarakhand Tour Packages$",
    r"^Kashmir Tour Packages$",
    r"^Himachal Tour Packages$",
    r"^Uttar Pradesh Tour Packages$",
    r"^Rajasthan Tour Packages$",
    r"^Madhya Pradesh Tour Packages$",
    r"^Goa Tour Packages$",
    r"^Tamil Nadu Tour Packages$",
    r"^Kerala Tour Packages$",
    r"^Orissa Tour Packages$",
    r"^Delhi Tour Packages$",
    r"^Gujarat Tour Packages$",
    r"^International Tour Packages$",
    r"^Europe Tour Packages$",
    r"^Asia Tour Packages$",
    r"^Sri Lanka Tour Packages$",
    r"^Dubai Tour Packages$",
    r"^Bali Tour Packages$",
    r"^Thailand Tour Packages$",
    r"^Singapore Tour Packages$",
    r"^Bhutan Tour Packages$",
    r"^Nepal Tour Packages$",
    r"^Malaysia Tour Packages$",
    r"^Egypt Tour Packages$",
    r"^Hong Kong Tour Packages$",
    r"^Trending Tour Packages$",
    r"^Pilgrimage Tour Packages$",
    r"^Honeymoon Tour Packages$",
    r"^Adventure Tours$",
    r"^Cruise Tours$",
    r"^Private Jet Tours$",
    r"^Speciality Tour$",
    // Menu prefixes
    r"^India Group Tour",
    r"^Fixed Departure",
    r"^Luxury Helicopter",
    r"^Helicopter Packages",
    r"^Buddhist Pilgrimage Tour",
    r"^10\+",
    r"^Q\d+:",
    r"^FAQs?",
    r"^Destinations ➝",
    r"^Popular",
    r"^Tour Cost\s*:",
];

pub const DEFAULT_TOUR_INDICATORS: &[&str] = &[
    // Tour types
    "Yatra",
    "Tour",
    "Package",
    "Darshan",
    "Helicopter",
    "Temple",
    "Pilgrimage",
    "Heritage",
    "Wildlife",
    "Safari",
    "Honeymoon",
    "Adventure",
    "Yoga",
    "Meditation",
    "Ayurveda",
    "Buddhist",
    "Circuit",
    "Trek",
    "Houseboat",
    "Backwaters",
    // India, pilgrim circuits
    "Golden Triangle",
    "Char Dham",
    "Chardham",
    "Amarnath",
    "Kedarnath",
    "Badrinath",
    "Gangotri",
    "Yamunotri",
    "Jyotirlinga",
    "Vaishno Devi",
    "Manimahesh",
    "Haridwar",
    "Rishikesh",
    "Varanasi",
    "Ayodhya",
    "Allahabad",
    "Prayagraj",
    "Chitrakoot",
    "Dwarka",
    "Somnath",
    "Shirdi",
    "Bhimashankar",
    "Ujjain",
    "Omkareshwar",
    "Tirupati",
    "Rameshwaram",
    "Madurai",
    "Kanyakumari",
    "Mahabalipuram",
    "Puri",
    "Konark",
    "Bhubaneswar",
    "Guwahati",
    "Kamakhya",
    "Muktinath",
    "Kailash",
    "Mansarovar",
    // India, Buddhist circuit
    "Bodhgaya",
    "Gaya",
    "Sarnath",
    "Kushinagar",
    "Lumbini",
    "Sravasti",
    "Rajgir",
    "Nalanda",
    // India, regions and cities
    "Rajasthan",
    "Jaipur",
    "Udaipur",
    "Jodhpur",
    "Jaisalmer",
    "Pushkar",
    "Agra",
    "Khajuraho",
    "Orchha",
    "Kerala",
    "Munnar",
    "Alleppey",
    "Goa",
    "Hampi",
    "Mysore",
    "Coorg",
    "Ooty",
    "Ajanta",
    "Ellora",
    "Ladakh",
    "Leh",
    "Spiti",
    "Shimla",
    "Manali",
    "Dharamshala",
    "Nainital",
    "Mussoorie",
    "Kashmir",
    "Srinagar",
    "Gulmarg",
    "Pahalgam",
    "Sonmarg",
    "Baltal",
    "Neelgrath",
    "Sikkim",
    "Gangtok",
    "Darjeeling",
    "Andaman",
    "Kaziranga",
    "Corbett",
    "Ranthambore",
    "Bandhavgarh",
    "Kanha",
    // International
    "Nepal",
    "Kathmandu",
    "Pokhara",
    "Bhutan",
    "Thimphu",
    "Paro",
    "Sri Lanka",
    "Colombo",
    "Sigiriya",
    "Kandy",
    "Nuwara Eliya",
    "Beruwala",
    "Maldives",
    "Singapore",
    "Malaysia",
    "Kuala Lumpur",
    "Thailand",
    "Bangkok",
    "Phuket",
    "Pattaya",
    "Koh Samui",
    "Dubai",
    "Abu Dhabi",
    "Bali",
    "Egypt",
    "Vietnam",
    "Japan",
    "Mauritius",
    "Europe",
    "Turkey",
    "Hong Kong",
    "Macau",
];
