//! Admin product forms

use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    forms::{Field, FormError, MainCategory, SubCategory, required},
    products::{ColorId, FileId, ProductId, SizeId, StockId},
};

/// Storage folder product images are uploaded into.
pub const IMAGE_FOLDER: &str = "public";

/// An image chosen for upload.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ImageUpload {
    /// File name, used as the object key under [`IMAGE_FOLDER`]
    pub file_name: String,

    /// MIME type
    pub content_type: String,

    /// File contents
    #[serde(default)]
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Object path inside the image bucket. Directory parts of the file name are dropped.
    #[must_use]
    pub fn storage_path(&self) -> String {
        let name = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();

        format!("{IMAGE_FOLDER}/{name}")
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// One color/size/stock input row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OptionRow {
    /// Color label
    #[serde(default)]
    pub color: String,

    /// Size label
    #[serde(default)]
    pub size: String,

    /// Stock count as typed
    #[serde(default)]
    pub stock: String,
}

/// A validated option: color `i` is paired with size `i` by stock `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductOption {
    /// Color label
    pub color: String,

    /// Size label
    pub size: String,

    /// Units in stock
    pub stock: u32,
}

/// New product form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductForm {
    /// Product name
    pub name: String,

    /// Price as typed
    pub price: String,

    /// Main category
    pub main_category: Option<MainCategory>,

    /// Sub category
    pub sub_category: Option<SubCategory>,

    /// Product image
    #[serde(default)]
    pub image: Option<ImageUpload>,

    /// Option rows, in display order
    #[serde(default)]
    pub options: Vec<OptionRow>,
}

/// Validated new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSubmission {
    /// Product name
    pub name: String,

    /// Price in minor units
    pub price: i64,

    /// Main category
    pub main_category: MainCategory,

    /// Sub category
    pub sub_category: SubCategory,

    /// Image to upload
    pub image: ImageUpload,

    /// Options, rows without a color dropped
    pub options: SmallVec<[ProductOption; 4]>,
}

impl ProductForm {
    /// Validate the form.
    ///
    /// Rows without a color are skipped. A row with a color needs a size and a stock count.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] found, checking fields in display order.
    pub fn validate(&self) -> Result<ProductSubmission, FormError> {
        let name = required(&self.name, Field::Name)?;
        let price = parse_price(&self.price)?;
        let main_category = self
            .main_category
            .ok_or(FormError::Required(Field::MainCategory))?;
        let sub_category = self
            .sub_category
            .ok_or(FormError::Required(Field::SubCategory))?;

        if sub_category.main() != main_category {
            return Err(FormError::SubCategoryMismatch {
                main: main_category,
                sub: sub_category,
            });
        }

        let image = self.image.clone().ok_or(FormError::Required(Field::Image))?;

        let mut options = SmallVec::new();

        for (row, option) in self.options.iter().enumerate() {
            let color = option.color.trim();

            if color.is_empty() {
                continue;
            }

            let size = option.size.trim();
            let stock = option.stock.trim();

            if size.is_empty() || stock.is_empty() {
                return Err(FormError::IncompleteOption(row));
            }

            options.push(ProductOption {
                color: color.to_string(),
                size: size.to_string(),
                stock: stock.parse().map_err(|_| FormError::InvalidStock(row))?,
            });
        }

        if options.is_empty() {
            return Err(FormError::Required(Field::Options));
        }

        Ok(ProductSubmission {
            name,
            price,
            main_category,
            sub_category,
            image,
            options,
        })
    }
}

/// An existing option row being edited; ids are fixed, values are editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOptionRow {
    /// Color row
    pub color_id: ColorId,

    /// Size row
    pub size_id: SizeId,

    /// Stock row
    pub stock_id: StockId,

    /// Editable values
    pub values: OptionRow,
}

/// Edit form for an existing product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEditForm {
    /// Product being edited
    pub product: ProductId,

    /// First image row, replaced when a new image is chosen
    pub file: Option<FileId>,

    /// New name, empty to keep
    pub name: String,

    /// New price, empty to keep
    pub price: String,

    /// New main category
    pub main_category: Option<MainCategory>,

    /// New sub category
    pub sub_category: Option<SubCategory>,

    /// Replacement image
    pub image: Option<ImageUpload>,

    /// Existing option rows
    pub options: Vec<EditOptionRow>,
}

/// Validated product edit. Only set fields are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEditSubmission {
    /// Product being edited
    pub product: ProductId,

    /// New name
    pub name: Option<String>,

    /// New price
    pub price: Option<i64>,

    /// New main category
    pub main_category: Option<MainCategory>,

    /// New sub category
    pub sub_category: Option<SubCategory>,

    /// Image row to repoint and the image to upload
    pub image: Option<(FileId, ImageUpload)>,

    /// Color label updates
    pub colors: Vec<(ColorId, String)>,

    /// Size label updates
    pub sizes: Vec<(SizeId, String)>,

    /// Stock count updates
    pub stocks: Vec<(StockId, u32)>,
}

impl ProductEditSubmission {
    /// Whether the product row itself changes.
    #[must_use]
    pub fn updates_product(&self) -> bool {
        self.name.is_some()
            || self.price.is_some()
            || self.main_category.is_some()
            || self.sub_category.is_some()
    }
}

impl ProductEditForm {
    /// Validate the edit. Empty fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPrice`] for a non-empty price that is not a positive
    /// whole number, [`FormError::SubCategoryMismatch`] when both categories are set
    /// and disagree, and [`FormError::InvalidStock`] for a non-numeric stock count.
    pub fn validate(&self) -> Result<ProductEditSubmission, FormError> {
        let name = non_empty(&self.name);
        let price = non_empty(&self.price)
            .map(|price| parse_price(&price))
            .transpose()?;

        if let (Some(main), Some(sub)) = (self.main_category, self.sub_category)
            && sub.main() != main
        {
            return Err(FormError::SubCategoryMismatch { main, sub });
        }

        let image = match (self.file, &self.image) {
            (Some(file), Some(image)) => Some((file, image.clone())),
            _ => None,
        };

        let mut colors = Vec::new();
        let mut sizes = Vec::new();
        let mut stocks = Vec::new();

        for (row, option) in self.options.iter().enumerate() {
            if let Some(color) = non_empty(&option.values.color) {
                colors.push((option.color_id, color));
            }

            if let Some(size) = non_empty(&option.values.size) {
                sizes.push((option.size_id, size));
            }

            if let Some(stock) = non_empty(&option.values.stock) {
                let stock = stock.parse().map_err(|_| FormError::InvalidStock(row))?;

                stocks.push((option.stock_id, stock));
            }
        }

        Ok(ProductEditSubmission {
            product: self.product,
            name,
            price,
            main_category: self.main_category,
            sub_category: self.sub_category,
            image,
            colors,
            sizes,
            stocks,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_price(value: &str) -> Result<i64, FormError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(FormError::Required(Field::Price));
    }

    match trimmed.parse::<i64>() {
        Ok(price) if price > 0 => Ok(price),
        _ => Err(FormError::InvalidPrice),
    }
}
