//! Sample catalog used for demos and first runs

use th_core::{NewContribution, NewTemple};
use tracing::info;

use crate::sources::SqliteCatalog;
use crate::DataError;

struct SampleTemple {
    name: &'static str,
    deity: &'static str,
    style: &'static str,
    built_year: Option<i32>,
    location: &'static str,
    coordinates: Option<(f64, f64)>,
    history: &'static str,
    contributor: Option<&'static str>,
}

const SAMPLE_TEMPLES: &[SampleTemple] = &[
    SampleTemple {
        name: "Brihadeeswara Temple",
        deity: "Shiva",
        style: "Dravidian",
        built_year: Some(1010),
        location: "Thanjavur, Tamil Nadu",
        coordinates: Some((10.7828, 79.1318)),
        history: "Built by Rajaraja Chola I, its vimana rises above sixty metres and is capped by a single granite block.",
        contributor: Some("Meera Iyer"),
    },
    SampleTemple {
        name: "Konark Sun Temple",
        deity: "Surya",
        style: "Nagara",
        built_year: Some(1250),
        location: "Konark, Odisha",
        coordinates: Some((19.8876, 86.0945)),
        history: "Conceived as the chariot of the sun god, with twenty-four carved stone wheels drawn by seven horses.",
        contributor: Some("Arjun Das"),
    },
    SampleTemple {
        name: "Meenakshi Amman Temple",
        deity: "Meenakshi",
        style: "Dravidian",
        built_year: Some(1623),
        location: "Madurai, Tamil Nadu",
        coordinates: Some((9.9195, 78.1193)),
        history: "Fourteen gopurams covered in painted stucco figures surround the twin shrines of Meenakshi and Sundareswarar.",
        contributor: None,
    },
    SampleTemple {
        name: "Kandariya Mahadeva Temple",
        deity: "Shiva",
        style: "Nagara",
        built_year: Some(1030),
        location: "Khajuraho, Madhya Pradesh",
        coordinates: Some((24.8525, 79.9199)),
        history: "The largest of the Khajuraho group, its rising spires imitate the peaks of Mount Kailash.",
        contributor: Some("Arjun Das"),
    },
    SampleTemple {
        name: "Chennakeshava Temple",
        deity: "Vishnu",
        style: "Vesara",
        built_year: Some(1117),
        location: "Belur, Karnataka",
        coordinates: Some((13.1623, 75.8679)),
        history: "A Hoysala temple on a star-shaped platform, known for the bracket figures of its hall.",
        contributor: Some("Kavya Rao"),
    },
    SampleTemple {
        name: "Virupaksha Temple",
        deity: "Shiva",
        style: "Dravidian",
        built_year: None,
        location: "Hampi, Karnataka",
        coordinates: Some((15.3350, 76.4600)),
        history: "In worship since before the Vijayanagara empire, it is the oldest functioning temple at Hampi.",
        contributor: None,
    },
    SampleTemple {
        name: "Kamakhya Temple",
        deity: "Kamakhya",
        style: "Other",
        built_year: Some(1565),
        location: "Guwahati, Assam",
        coordinates: None,
        history: "Rebuilt by the Koch kings on Nilachal hill, with a beehive-like dome over the sanctum.",
        contributor: Some("Meera Iyer"),
    },
];

struct SampleContribution {
    title: &'static str,
    content_type: &'static str,
    description: &'static str,
    coordinates: Option<(f64, f64)>,
    location: Option<&'static str>,
    contributor: Option<&'static str>,
}

const SAMPLE_CONTRIBUTIONS: &[SampleContribution] = &[
    SampleContribution {
        title: "Gopuram at dawn",
        content_type: "Photo/Image",
        description: "East gopuram of the Meenakshi temple photographed at sunrise.",
        coordinates: Some((9.9195, 78.1193)),
        location: Some("Madurai, Tamil Nadu"),
        contributor: Some("Kavya Rao"),
    },
    SampleContribution {
        title: "Evening aarti chant",
        content_type: "Audio Recording",
        description: "Recording of the evening aarti at the Virupaksha temple.",
        coordinates: Some((15.3350, 76.4600)),
        location: Some("Hampi, Karnataka"),
        contributor: None,
    },
    SampleContribution {
        title: "Chola inscriptions transcript",
        content_type: "Document",
        description: "Transcription of the Tamil inscriptions on the Brihadeeswara plinth.",
        coordinates: None,
        location: Some("Thanjavur, Tamil Nadu"),
        contributor: Some("Meera Iyer"),
    },
    SampleContribution {
        title: "Konark dance festival",
        content_type: "Historical Event",
        description: "Notes from the annual classical dance festival held against the temple backdrop.",
        coordinates: Some((19.8876, 86.0945)),
        location: Some("Konark, Odisha"),
        contributor: Some("Arjun Das"),
    },
    SampleContribution {
        title: "Belur restoration notes",
        content_type: "Temple Information",
        description: "Summary of the conservation work carried out on the Chennakeshava bracket figures.",
        coordinates: Some((13.1623, 75.8679)),
        location: Some("Belur, Karnataka"),
        contributor: Some("Kavya Rao"),
    },
];

/// Insert the sample temples and contributions into an empty catalog.
///
/// Returns the number of records inserted; a catalog that already holds
/// temples is left untouched.
pub fn seed_sample_catalog(catalog: &SqliteCatalog) -> Result<usize, DataError> {
    if catalog.count_temples()? > 0 {
        info!("Catalog already populated, skipping sample data");
        return Ok(0);
    }

    let mut inserted = 0;
    for sample in SAMPLE_TEMPLES {
        let temple = NewTemple {
            name: sample.name.to_string(),
            deity: Some(sample.deity.to_string()),
            architectural_style: Some(sample.style.to_string()),
            built_year: sample.built_year,
            location_address: Some(sample.location.to_string()),
            latitude: sample.coordinates.map(|(lat, _)| lat),
            longitude: sample.coordinates.map(|(_, lon)| lon),
            history: Some(sample.history.to_string()),
            contributor_name: sample.contributor.map(str::to_string),
        };
        catalog.insert_temple_at(&temple, None)?;
        inserted += 1;
    }

    for sample in SAMPLE_CONTRIBUTIONS {
        let contribution = NewContribution {
            title: sample.title.to_string(),
            content_type: Some(sample.content_type.to_string()),
            description: Some(sample.description.to_string()),
            file_url: None,
            latitude: sample.coordinates.map(|(lat, _)| lat),
            longitude: sample.coordinates.map(|(_, lon)| lon),
            location_address: sample.location.map(str::to_string),
            contributor_name: sample.contributor.map(str::to_string),
        };
        catalog.insert_contribution_at(&contribution, None)?;
        inserted += 1;
    }

    info!("Seeded catalog with {} sample records", inserted);
    Ok(inserted)
}
