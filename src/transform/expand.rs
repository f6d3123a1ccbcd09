//! Quantity expansion of part rows into individual parts.

use crate::config::PartNaming;
use crate::error::Result;
use crate::model::{Part, PartSpec};

/// Expand each row into `quantity` parts, in row order.
///
/// Rows with zero quantity contribute nothing. Dimensions are validated per row
/// even when the quantity is zero, so a bad row is reported regardless.
pub fn expand_quantities(specs: &[PartSpec], naming: PartNaming) -> Result<Vec<Part>> {
    let mut parts = Vec::new();

    for spec in specs {
        let template = Part::new(spec.name.clone(), spec.width, spec.depth)?;
        for i in 1..=spec.quantity {
            let name = match naming {
                PartNaming::Indexed => format!("{}-{}", spec.name, i),
                PartNaming::Plain => spec.name.clone(),
            };
            parts.push(Part {
                name,
                ..template.clone()
            });
        }
    }

    Ok(parts)
}
