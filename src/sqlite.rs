use rusqlite::Connection;

use crate::error::{storage, Result};

/// Schema definition for the SQLite database
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// DDL for every table and index, in declaration order
    pub fn to_sql(&self) -> String {
        self.tables
            .iter()
            .map(TableDefinition::to_sql)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub foreign_keys: Vec<ForeignKey>,
    pub indexes: Vec<IndexDefinition>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }
    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }
    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }
    pub fn with_index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn to_sql(&self) -> String {
        let mut parts: Vec<String> = self.columns.iter().map(ColumnDefinition::to_sql).collect();
        parts.extend(self.foreign_keys.iter().map(ForeignKey::to_sql));
        let mut sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({});",
            self.name,
            parts.join(", ")
        );
        for index in &self.indexes {
            sql.push('\n');
            sql.push_str(&index.to_sql(&self.name));
        }
        sql
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            constraints: Vec::new(),
        }
    }
    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.as_sql());
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.as_sql());
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
}

impl DataType {
    fn as_sql(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    /// An `INTEGER PRIMARY KEY` column aliases the rowid and is auto-assigned
    PrimaryKey,
    NotNull,
}

impl ColumnConstraint {
    fn as_sql(self) -> &'static str {
        match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::NotNull => "NOT NULL",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub column: String,
    pub foreign_table: String,
    pub foreign_column: String,
    pub on_delete: ForeignKeyAction,
    pub on_update: ForeignKeyAction,
}

impl ForeignKey {
    fn to_sql(&self) -> String {
        format!(
            "FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {} ON UPDATE {}",
            self.column,
            self.foreign_table,
            self.foreign_column,
            self.on_delete.as_sql(),
            self.on_update.as_sql()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyAction {
    Cascade,
    Restrict,
}

impl ForeignKeyAction {
    fn as_sql(self) -> &'static str {
        match self {
            ForeignKeyAction::Cascade => "CASCADE",
            ForeignKeyAction::Restrict => "RESTRICT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    pub name: String,
    pub columns: Vec<String>,
}

impl IndexDefinition {
    fn to_sql(&self, table: &str) -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({});",
            self.name,
            table,
            self.columns.join(", ")
        )
    }
}

/// The `Courses` / `Reviews` schema. Deleting a course removes its reviews.
pub fn course_review_schema() -> Schema {
    let courses = TableDefinition::new("Courses")
        .with_column(
            ColumnDefinition::new("id", DataType::Integer)
                .with_constraint(ColumnConstraint::PrimaryKey),
        )
        .with_column(
            ColumnDefinition::new("name", DataType::Text)
                .with_constraint(ColumnConstraint::NotNull),
        )
        .with_column(ColumnDefinition::new("url", DataType::Text));

    let reviews = TableDefinition::new("Reviews")
        .with_column(
            ColumnDefinition::new("id", DataType::Integer)
                .with_constraint(ColumnConstraint::PrimaryKey),
        )
        .with_column(
            ColumnDefinition::new("courseId", DataType::Integer)
                .with_constraint(ColumnConstraint::NotNull),
        )
        .with_column(
            ColumnDefinition::new("rating", DataType::Integer)
                .with_constraint(ColumnConstraint::NotNull),
        )
        .with_column(
            ColumnDefinition::new("comment", DataType::Text)
                .with_constraint(ColumnConstraint::NotNull),
        )
        .with_foreign_key(ForeignKey {
            column: "courseId".to_string(),
            foreign_table: "Courses".to_string(),
            foreign_column: "id".to_string(),
            on_delete: ForeignKeyAction::Cascade,
            on_update: ForeignKeyAction::Restrict,
        })
        .with_index(IndexDefinition {
            name: "idx_reviews_course_id".to_string(),
            columns: vec!["courseId".to_string()],
        });

    Schema::new().add_table(courses).add_table(reviews)
}

/// Enable foreign-key enforcement, which SQLite leaves off per connection
pub fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(storage("Unable to enable foreign keys"))
}

/// Create every table and index in `schema` that does not exist yet
pub fn initialize_schema(conn: &Connection, schema: &Schema) -> Result<()> {
    conn.execute_batch(&schema.to_sql())
        .map_err(storage("Unable to initialize the schema"))?;
    tracing::debug!(tables = schema.tables.len(), "Initialized schema");
    Ok(())
}

/// SQLite configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteConfig {
    /// Path to the SQLite database file
    pub db_path: String,
    /// Schema definition for the database
    pub schema: Schema,
}

impl SqliteConfig {
    /// Create a new SQLite config with path and schema
    pub fn new(db_path: impl Into<String>, schema: Schema) -> Self {
        Self {
            db_path: db_path.into(),
            schema,
        }
    }

    /// Config for a private in-memory database
    pub fn in_memory(schema: Schema) -> Self {
        Self::new(":memory:", schema)
    }

    /// Open the database, enable foreign keys and create the schema.
    ///
    /// The returned connection belongs to the caller; persisters only borrow it.
    pub fn open(&self) -> Result<Connection> {
        tracing::debug!(path = %self.db_path, "Opening sqlite database");
        let conn = Connection::open(&self.db_path)
            .map_err(storage("Unable to open the database"))?;
        configure(&conn)?;
        initialize_schema(&conn, &self.schema)?;
        Ok(conn)
    }
}
