//! Plain declaration of the people table.
//!
//! The shape lives here, independent of any database driver; storage backends
//! render it into whatever their engine needs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
  Integer,
  Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
  pub name: &'static str,
  pub kind: ColumnKind,
  pub primary_key: bool,
}

impl Column {
  const fn text(name: &'static str) -> Self {
    Self { name, kind: ColumnKind::Text, primary_key: false }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct TableShape {
  pub name: &'static str,
  pub columns: &'static [Column],
}

impl TableShape {
  pub fn primary_key(&self) -> Option<&Column> {
    self.columns.iter().find(|column| column.primary_key)
  }

  pub fn column_names(&self) -> Vec<&'static str> {
    self.columns.iter().map(|column| column.name).collect()
  }

  /// Idempotent DDL for the table
  pub fn create_table_sql(&self) -> String {
    let columns = self
      .columns
      .iter()
      .map(|column| {
        let sql_type = match column.kind {
          ColumnKind::Integer => "INTEGER",
          ColumnKind::Text => "TEXT",
        };
        if column.primary_key {
          format!("{} {} PRIMARY KEY", column.name, sql_type)
        } else {
          format!("{} {}", column.name, sql_type)
        }
      })
      .collect::<Vec<_>>()
      .join(", ");

    format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, columns)
  }

  /// Parameterized INSERT with `$n` placeholders in column order
  pub fn insert_sql(&self) -> String {
    let placeholders =
      (1..=self.columns.len()).map(|n| format!("${n}")).collect::<Vec<_>>().join(", ");

    format!(
      "INSERT INTO {} ({}) VALUES ({})",
      self.name,
      self.column_names().join(", "),
      placeholders
    )
  }

  pub fn select_sql(&self) -> String {
    let key = self.primary_key().map(|column| column.name).unwrap_or("id");
    format!("SELECT {} FROM {} ORDER BY {}", self.column_names().join(", "), self.name, key)
  }
}

pub const PEOPLE_TABLE: TableShape = TableShape {
  name: "swapi_people",
  columns: &[
    Column { name: "id", kind: ColumnKind::Integer, primary_key: true },
    Column::text("name"),
    Column::text("birth_year"),
    Column::text("eye_color"),
    Column::text("films"),
    Column::text("gender"),
    Column::text("hair_color"),
    Column::text("height"),
    Column::text("homeworld"),
    Column::text("mass"),
    Column::text("skin_color"),
    Column::text("species"),
    Column::text("starships"),
    Column::text("vehicles"),
  ],
};
