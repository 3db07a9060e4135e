use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a person resource, also the primary key of its stored row.
pub type PersonId = i32;

/// A person exactly as `GET /people/<id>/` returns it.
///
/// Scalars stay optional so a missing field is stored as NULL rather than an
/// invented default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub birth_year: Option<String>,
  #[serde(default)]
  pub eye_color: Option<String>,
  #[serde(default)]
  pub gender: Option<String>,
  #[serde(default)]
  pub hair_color: Option<String>,
  #[serde(default)]
  pub height: Option<String>,
  #[serde(default)]
  pub mass: Option<String>,
  #[serde(default)]
  pub skin_color: Option<String>,
  #[serde(default)]
  pub homeworld: Option<String>,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub films: Vec<String>,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub species: Vec<String>,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub starships: Vec<String>,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub vehicles: Vec<String>,
}

/// `"films": null` reads the same as a missing or empty list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Person {
  /// Reference URLs for one group, in the order the API listed them.
  /// Homeworld is normalized into a zero- or one-element list.
  pub fn references(&self, group: ReferenceGroup) -> Vec<String> {
    match group {
      ReferenceGroup::Films => self.films.clone(),
      ReferenceGroup::Homeworld => self.homeworld.iter().cloned().collect(),
      ReferenceGroup::Species => self.species.clone(),
      ReferenceGroup::Starships => self.starships.clone(),
      ReferenceGroup::Vehicles => self.vehicles.clone(),
    }
  }
}

/// Any resource a person links to. Only the display field is ever read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub title: Option<String>,
}

impl Reference {
  pub fn display(&self, group: ReferenceGroup) -> Option<&str> {
    match group.display_field() {
      DisplayField::Title => self.title.as_deref(),
      DisplayField::Name => self.name.as_deref(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayField {
  Name,
  Title,
}

impl DisplayField {
  pub fn key(&self) -> &'static str {
    match self {
      DisplayField::Name => "name",
      DisplayField::Title => "title",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceGroup {
  Films,
  Homeworld,
  Species,
  Starships,
  Vehicles,
}

impl ReferenceGroup {
  pub const ALL: [ReferenceGroup; 5] = [
    ReferenceGroup::Films,
    ReferenceGroup::Homeworld,
    ReferenceGroup::Species,
    ReferenceGroup::Starships,
    ReferenceGroup::Vehicles,
  ];

  pub fn display_field(&self) -> DisplayField {
    match self {
      ReferenceGroup::Films => DisplayField::Title,
      _ => DisplayField::Name,
    }
  }

  pub fn column(&self) -> &'static str {
    match self {
      ReferenceGroup::Films => "films",
      ReferenceGroup::Homeworld => "homeworld",
      ReferenceGroup::Species => "species",
      ReferenceGroup::Starships => "starships",
      ReferenceGroup::Vehicles => "vehicles",
    }
  }
}

/// Display names of all five groups, each in original list order.
/// Every entry has already been checked to carry its group's display field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedReferences {
  pub films: Vec<String>,
  pub homeworld: Vec<String>,
  pub species: Vec<String>,
  pub starships: Vec<String>,
  pub vehicles: Vec<String>,
}

impl ResolvedReferences {
  pub fn group(&self, group: ReferenceGroup) -> &[String] {
    match group {
      ReferenceGroup::Films => &self.films,
      ReferenceGroup::Homeworld => &self.homeworld,
      ReferenceGroup::Species => &self.species,
      ReferenceGroup::Starships => &self.starships,
      ReferenceGroup::Vehicles => &self.vehicles,
    }
  }

  pub fn group_mut(&mut self, group: ReferenceGroup) -> &mut Vec<String> {
    match group {
      ReferenceGroup::Films => &mut self.films,
      ReferenceGroup::Homeworld => &mut self.homeworld,
      ReferenceGroup::Species => &mut self.species,
      ReferenceGroup::Starships => &mut self.starships,
      ReferenceGroup::Vehicles => &mut self.vehicles,
    }
  }
}

/// The denormalized, storage-ready person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRow {
  pub id: PersonId,
  pub name: Option<String>,
  pub birth_year: Option<String>,
  pub eye_color: Option<String>,
  pub films: String,
  pub gender: Option<String>,
  pub hair_color: Option<String>,
  pub height: Option<String>,
  pub homeworld: String,
  pub mass: Option<String>,
  pub skin_color: Option<String>,
  pub species: String,
  pub starships: String,
  pub vehicles: String,
}

impl PersonRow {
  /// Text column values keyed by column name, in table order.
  pub fn text_values(&self) -> Vec<(&'static str, Option<&str>)> {
    vec![
      ("name", self.name.as_deref()),
      ("birth_year", self.birth_year.as_deref()),
      ("eye_color", self.eye_color.as_deref()),
      ("films", Some(self.films.as_str())),
      ("gender", self.gender.as_deref()),
      ("hair_color", self.hair_color.as_deref()),
      ("height", self.height.as_deref()),
      ("homeworld", Some(self.homeworld.as_str())),
      ("mass", self.mass.as_deref()),
      ("skin_color", self.skin_color.as_deref()),
      ("species", Some(self.species.as_str())),
      ("starships", Some(self.starships.as_str())),
      ("vehicles", Some(self.vehicles.as_str())),
    ]
  }
}
