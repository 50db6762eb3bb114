//! Fixture object types and registry shared by the integration tests.

use polyconf::{
    ConfigDeserializable, ConfigSerializable, Mapping, Registry, Result, Value,
    constants::DISCRIMINATOR_KEY, registry::FieldReader,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(world: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.to_string(),
            x,
            y,
            z,
        }
    }
}

impl ConfigSerializable for Location {
    fn serialize(&self) -> Mapping {
        let mut fields = Mapping::new();
        fields.insert("world", self.world.as_str());
        fields.insert("x", self.x);
        fields.insert("y", self.y);
        fields.insert("z", self.z);
        fields
    }
}

impl ConfigDeserializable for Location {
    fn deserialize(fields: &Mapping) -> Result<Self> {
        let fields = FieldReader::new(fields);
        Ok(Location {
            world: fields.text("world")?.to_string(),
            x: fields.float("x")?,
            y: fields.float("y")?,
            z: fields.float("z")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemMeta {
    pub display_name: String,
    pub lore: Vec<String>,
}

impl ConfigSerializable for ItemMeta {
    fn serialize(&self) -> Mapping {
        let mut fields = Mapping::new();
        fields.insert("display-name", self.display_name.as_str());
        fields.insert("lore", self.lore.clone());
        fields
    }
}

impl ConfigDeserializable for ItemMeta {
    fn deserialize(fields: &Mapping) -> Result<Self> {
        let fields = FieldReader::new(fields);
        let lore: Vec<String> = fields
            .list("lore")?
            .iter()
            .map(|line| {
                line.as_text()
                    .map(str::to_string)
                    .ok_or_else(|| fields.invalid("lore", "lines must be text"))
            })
            .collect::<Result<_>>()?;
        Ok(ItemMeta {
            display_name: fields.text("display-name")?.to_string(),
            lore,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub material: String,
    pub amount: i32,
    pub meta: Option<ItemMeta>,
}

impl ItemStack {
    pub fn new(material: &str, amount: i32) -> Self {
        Self {
            material: material.to_string(),
            amount,
            meta: None,
        }
    }

    pub fn with_meta(mut self, display_name: &str, lore: &[&str]) -> Self {
        self.meta = Some(ItemMeta {
            display_name: display_name.to_string(),
            lore: lore.iter().map(|l| l.to_string()).collect(),
        });
        self
    }
}

impl ConfigSerializable for ItemStack {
    fn serialize(&self) -> Mapping {
        let mut fields = Mapping::new();
        fields.insert("type", self.material.as_str());
        fields.insert("amount", self.amount);
        if let Some(meta) = &self.meta {
            fields.insert("meta", Value::Object(Box::new(meta.clone())));
        }
        fields
    }
}

impl ConfigDeserializable for ItemStack {
    fn deserialize(fields: &Mapping) -> Result<Self> {
        let fields = FieldReader::new(fields);
        let amount = fields.int("amount")?;
        if amount < 1 {
            return Err(fields.invalid("amount", "must be positive"));
        }
        let meta = match fields.optional("meta") {
            Some(_) => Some(fields.object::<ItemMeta>("meta")?.clone()),
            None => None,
        };
        Ok(ItemStack {
            material: fields.text("type")?.to_string(),
            amount,
            meta,
        })
    }
}

/// Three levels of objects nested through mappings: kit → icon → meta.
#[derive(Debug, Clone, PartialEq)]
pub struct Kit {
    pub name: String,
    pub icon: ItemStack,
    pub spawn: Location,
}

impl ConfigSerializable for Kit {
    fn serialize(&self) -> Mapping {
        let mut fields = Mapping::new();
        fields.insert("name", self.name.as_str());
        fields.insert("icon", Value::Object(Box::new(self.icon.clone())));
        fields.insert("spawn", Value::Object(Box::new(self.spawn.clone())));
        fields
    }
}

impl ConfigDeserializable for Kit {
    fn deserialize(fields: &Mapping) -> Result<Self> {
        let fields = FieldReader::new(fields);
        Ok(Kit {
            name: fields.text("name")?.to_string(),
            icon: fields.object::<ItemStack>("icon")?.clone(),
            spawn: fields.object::<Location>("spawn")?.clone(),
        })
    }
}

/// Keeps whatever fields it was built from, exposing the tree exactly as the
/// converter left it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub fields: Mapping,
}

impl Snapshot {
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key, value);
        self
    }
}

impl ConfigSerializable for Snapshot {
    fn serialize(&self) -> Mapping {
        self.fields.clone()
    }
}

impl ConfigDeserializable for Snapshot {
    fn deserialize(fields: &Mapping) -> Result<Self> {
        let mut fields = fields.clone();
        fields.remove(DISCRIMINATOR_KEY);
        Ok(Snapshot { fields })
    }
}

pub fn object(value: impl ConfigSerializable) -> Value {
    Value::Object(Box::new(value))
}

/// Registry with every fixture type under a short alias.
pub fn test_registry() -> Registry {
    Registry::new()
        .with::<Location>("Location")
        .with::<ItemMeta>("ItemMeta")
        .with::<ItemStack>("ItemStack")
        .with::<Kit>("Kit")
        .with::<Snapshot>("Snapshot")
}

pub fn sample_kit() -> Kit {
    Kit {
        name: "starter".to_string(),
        icon: ItemStack::new("DIAMOND_SWORD", 1).with_meta("Blade", &["sharp", "shiny"]),
        spawn: Location::new("world", 10.0, 64.0, -3.5),
    }
}

/// True if any value in the tree is still an unexpanded object.
pub fn contains_object(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Map(mapping) => mapping.values().any(contains_object),
        Value::List(list) => list.iter().any(contains_object),
        _ => false,
    }
}

/// Builds a discriminated mapping value by hand.
pub fn discriminated(alias: &str, entries: Vec<(&str, Value)>) -> Value {
    let mut mapping = Mapping::new();
    mapping.insert(DISCRIMINATOR_KEY, alias);
    mapping.extend(entries);
    Value::Map(mapping)
}
