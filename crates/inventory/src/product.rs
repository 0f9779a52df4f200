use core::str::FromStr;

use serde::{Deserialize, Serialize};

use toolcrib_core::{DomainError, DomainResult, Entity, ProductId};

/// Upper bound on product name length (characters).
pub const MAX_NAME_LEN: usize = 100;

/// Checkout status of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    #[default]
    Available,
    #[serde(rename = "In-Use")]
    InUse,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Available => "Available",
            ProductStatus::InUse => "In-Use",
        }
    }

    /// Status implied by the number of open issuances of a product.
    pub fn from_open_count(open_issuances: usize) -> Self {
        if open_issuances == 0 {
            ProductStatus::Available
        } else {
            ProductStatus::InUse
        }
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(ProductStatus::Available),
            // "In Use" is how older databases spelled it.
            "In-Use" | "In Use" => Ok(ProductStatus::InUse),
            other => Err(DomainError::validation(format!("unknown product status '{other}'"))),
        }
    }
}

/// A validated, not-yet-stored product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    name: String,
    description: Option<String>,
}

impl NewProduct {
    /// Validate a manual or imported product entry.
    ///
    /// The name is trimmed and must be non-empty and at most [`MAX_NAME_LEN`]
    /// characters. A blank description is stored as absent.
    pub fn new(name: impl Into<String>, description: Option<String>) -> DomainResult<Self> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }

        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            name: name.to_string(),
            description,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A stored product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    description: Option<String>,
    status: ProductStatus,
}

impl Product {
    /// A freshly created product: always Available.
    pub fn create(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            status: ProductStatus::Available,
        }
    }

    /// Rebuild a product from a stored row.
    pub fn restore(
        id: ProductId,
        name: String,
        description: Option<String>,
        status: ProductStatus,
    ) -> Self {
        Self {
            id,
            name,
            description,
            status,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Available
    }

    /// Re-derive the status from the product's current open issuance count.
    pub fn sync_status(&mut self, open_issuances: usize) {
        self.status = ProductStatus::from_open_count(open_issuances);
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
