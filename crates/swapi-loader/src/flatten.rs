use crate::model::{Person, PersonId, PersonRow, ReferenceGroup, ResolvedReferences};

pub const SEPARATOR: &str = ", ";

/// Join the display names of one resolved group, keeping list order.
pub fn join_group(names: &[String]) -> String {
  names.join(SEPARATOR)
}

/// Combine a person and its resolved references into a storable row.
pub fn flatten(id: PersonId, person: &Person, references: &ResolvedReferences) -> PersonRow {
  let joined = |group: ReferenceGroup| join_group(references.group(group));

  PersonRow {
    id,
    name: person.name.clone(),
    birth_year: person.birth_year.clone(),
    eye_color: person.eye_color.clone(),
    films: joined(ReferenceGroup::Films),
    gender: person.gender.clone(),
    hair_color: person.hair_color.clone(),
    height: person.height.clone(),
    homeworld: joined(ReferenceGroup::Homeworld),
    mass: person.mass.clone(),
    skin_color: person.skin_color.clone(),
    species: joined(ReferenceGroup::Species),
    starships: joined(ReferenceGroup::Starships),
    vehicles: joined(ReferenceGroup::Vehicles),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
  }

  fn luke() -> Person {
    Person {
      name: Some("Luke Skywalker".to_string()),
      birth_year: Some("19BBY".to_string()),
      eye_color: Some("blue".to_string()),
      gender: Some("male".to_string()),
      hair_color: Some("blond".to_string()),
      height: Some("172".to_string()),
      mass: Some("77".to_string()),
      skin_color: Some("fair".to_string()),
      ..Default::default()
    }
  }

  #[test]
  fn test_scalars_copied_verbatim() {
    let person = luke();
    let row = flatten(1, &person, &ResolvedReferences::default());

    assert_eq!(row.id, 1);
    assert_eq!(row.name, person.name);
    assert_eq!(row.birth_year, person.birth_year);
    assert_eq!(row.eye_color, person.eye_color);
    assert_eq!(row.gender, person.gender);
    assert_eq!(row.hair_color, person.hair_color);
    assert_eq!(row.height, person.height);
    assert_eq!(row.mass, person.mass);
    assert_eq!(row.skin_color, person.skin_color);
  }

  #[test]
  fn test_absent_scalars_stay_absent() {
    let person = Person { name: Some("IG-88".to_string()), ..Default::default() };
    let row = flatten(23, &person, &ResolvedReferences::default());
    assert!(row.hair_color.is_none());
    assert!(row.birth_year.is_none());
  }

  #[test]
  fn test_join_preserves_reference_order() {
    let references = ResolvedReferences {
      films: names(&["A New Hope", "The Empire Strikes Back"]),
      ..Default::default()
    };
    let row = flatten(1, &luke(), &references);
    assert_eq!(row.films, "A New Hope, The Empire Strikes Back");
  }

  #[test]
  fn test_empty_groups_yield_empty_strings() {
    let row = flatten(1, &luke(), &ResolvedReferences::default());
    assert_eq!(row.films, "");
    assert_eq!(row.homeworld, "");
    assert_eq!(row.species, "");
    assert_eq!(row.starships, "");
    assert_eq!(row.vehicles, "");
  }

  #[test]
  fn test_single_element_group_has_no_separator() {
    let references =
      ResolvedReferences { homeworld: names(&["Tatooine"]), ..Default::default() };
    let row = flatten(1, &luke(), &references);
    assert_eq!(row.homeworld, "Tatooine");
  }

  #[test]
  fn test_duplicates_are_kept() {
    let references = ResolvedReferences {
      starships: names(&["X-wing", "X-wing"]),
      ..Default::default()
    };
    let row = flatten(1, &luke(), &references);
    assert_eq!(row.starships, "X-wing, X-wing");
  }

  #[test]
  fn test_flatten_is_deterministic() {
    let references = ResolvedReferences {
      films: names(&["A New Hope"]),
      vehicles: names(&["Snowspeeder", "Imperial Speeder Bike"]),
      ..Default::default()
    };
    assert_eq!(flatten(1, &luke(), &references), flatten(1, &luke(), &references));
  }
}
