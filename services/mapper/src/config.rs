use typed_builder::TypedBuilder;

/// How `save` writes an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveBehavior {
    /// Write the attributes the item carries; attributes stored but not carried are left as is.
    Update,
    /// Replace the whole stored item.
    Clobber,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsistentReads {
    Eventual,
    Consistent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableNameOverride {
    /// Prepended to the table name of the item type, e.g. per environment.
    Prefix(String),
    /// Used instead of the table name of the item type.
    Replace(String),
}

/// Per-call mapper settings. `MapperConfig::default()` is what the mapper uses when none is given.
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct MapperConfig {
    #[builder(default = SaveBehavior::Update)]
    pub save_behavior: SaveBehavior,

    #[builder(default = ConsistentReads::Eventual)]
    pub consistent_reads: ConsistentReads,

    #[builder(default, setter(strip_option))]
    pub table_name_override: Option<TableNameOverride>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        MapperConfig::builder().build()
    }
}

impl MapperConfig {
    pub fn table_name(&self, table_name: &str) -> String {
        match &self.table_name_override {
            None => table_name.to_owned(),
            Some(TableNameOverride::Prefix(prefix)) => format!("{}{}", prefix, table_name),
            Some(TableNameOverride::Replace(name)) => name.clone(),
        }
    }

    pub fn consistent_read(&self) -> bool {
        self.consistent_reads == ConsistentReads::Consistent
    }
}
