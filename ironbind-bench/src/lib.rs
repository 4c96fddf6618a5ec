//! # IronBind Bench
//!
//! Synthetic packages for IronBind performance testing.

use ironbind_schema::{Package, PrimitiveType, PropertyDef, ResourceType, ValueShape};

/// Builds a package of `resources` resource types with `properties`
/// properties each.
///
/// Every fourth property differs from the previous one only in case, so
/// case-insensitive languages exercise disambiguation.
#[must_use]
pub fn synthetic_package(resources: usize, properties: usize) -> Package {
    let mut package = Package::new("bench", "1.0.0");
    for r in 0..resources {
        package.add_resource(synthetic_resource(&format!("bench:mod{}:Resource{r}", r % 8), properties));
    }
    package
}

/// Builds one resource type with `properties` properties.
#[must_use]
pub fn synthetic_resource(token: &str, properties: usize) -> ResourceType {
    let mut resource = ResourceType::new(token);
    for p in 0..properties {
        let name = if p % 4 == 3 {
            format!("PROPERTY{}", p - 1)
        } else {
            format!("property{p}")
        };
        let shape = match p % 3 {
            0 => ValueShape::string(),
            1 => ValueShape::Primitive(PrimitiveType::Integer),
            _ => ValueShape::array_of(ValueShape::string()),
        };
        let mut property = PropertyDef::new(name, shape);
        if p % 5 == 0 {
            property = property.required();
        }
        if p % 7 == 6 {
            property = property.output_only();
        }
        resource.add_property(property);
    }
    resource
}

/// Desired names that collide heavily with one another and with the
/// structural members of every preset language.
#[must_use]
pub fn colliding_names(count: usize) -> Vec<String> {
    const BASES: [&str; 6] = ["id", "urn", "get", "name", "class", "empty"];
    (0..count)
        .map(|i| {
            let base = BASES[i % BASES.len()];
            if i % 2 == 0 {
                base.to_string()
            } else {
                base.to_uppercase()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_package_is_valid() {
        let package = synthetic_package(16, 12);
        assert_eq!(package.resources.len(), 16);
        ironbind_schema::validate_package(&package).expect("valid package");
    }

    #[test]
    fn test_colliding_names() {
        let names = colliding_names(4);
        assert_eq!(names, vec!["id", "URN", "get", "NAME"]);
    }
}
