use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Deserialize;
use storefront::{
    forms::{ImageUpload, MainCategory, OptionRow, ProductForm, SubCategory},
    products::ProductId,
};
use storefront_app::context::AppContext;

use crate::{
    commands::{read_bytes, read_yaml, sign_in},
    config::Credentials,
    errors::{CliError, report},
    output,
};

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(flatten)]
    credentials: Credentials,

    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Register a product described by a YAML file
    Create {
        /// Product YAML file
        file: PathBuf,
    },

    /// List every product, newest first
    List,

    /// Change a product from a YAML file, keeping absent fields
    Edit {
        /// Product id
        id: ProductId,

        /// Changes YAML file
        file: PathBuf,
    },

    /// Delete a product with its images and options
    Delete {
        /// Product id
        id: ProductId,
    },
}

/// Product file as written by hand. `image` is a path relative to the YAML file.
#[derive(Debug, Deserialize)]
struct ProductFile {
    name: String,
    price: String,
    main_category: MainCategory,
    sub_category: SubCategory,
    image: PathBuf,
    #[serde(default)]
    options: Vec<OptionRow>,
}

/// Edit file; option rows are matched to the stored rows by position.
#[derive(Debug, Default, Deserialize)]
struct ProductChanges {
    name: Option<String>,
    price: Option<String>,
    main_category: Option<MainCategory>,
    sub_category: Option<SubCategory>,
    image: Option<PathBuf>,
    #[serde(default)]
    options: Vec<OptionRow>,
}

pub(crate) async fn run(context: &AppContext, command: AdminCommand) -> Result<(), CliError> {
    sign_in(context, &command.credentials).await?;

    let mut controller = context.admin_controller();

    match command.command {
        AdminSubcommand::Create { file } => {
            let product: ProductFile = read_yaml(&file).await?;
            let image = load_image(&file, &product.image).await?;

            *controller.form_mut() = ProductForm {
                name: product.name,
                price: product.price,
                main_category: Some(product.main_category),
                sub_category: Some(product.sub_category),
                image: Some(image),
                options: product.options,
            };

            report(controller.create().await)?;
        }
        AdminSubcommand::List => {
            controller.load_list().await?;
        }
        AdminSubcommand::Edit { id, file } => {
            let changes: ProductChanges = read_yaml(&file).await?;
            let image = match &changes.image {
                Some(path) => Some(load_image(&file, path).await?),
                None => None,
            };

            controller.begin_edit(id).await?;

            if let Some(form) = controller.editing_mut() {
                if let Some(name) = changes.name {
                    form.name = name;
                }
                if let Some(price) = changes.price {
                    form.price = price;
                }
                form.main_category = changes.main_category.or(form.main_category);
                form.sub_category = changes.sub_category.or(form.sub_category);
                form.image = image;

                for (row, values) in form.options.iter_mut().zip(changes.options) {
                    row.values = values;
                }
            }

            report(controller.submit_edit().await)?;
        }
        AdminSubcommand::Delete { id } => {
            report(controller.delete(id).await)?;
        }
    }

    if controller.products().is_empty() {
        controller.load_list().await?;
    }

    println!("{}", output::product_details(controller.products()));

    Ok(())
}

async fn load_image(manifest: &Path, image: &Path) -> Result<ImageUpload, CliError> {
    let path = manifest
        .parent()
        .map_or_else(|| image.to_path_buf(), |dir| dir.join(image));

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(ImageUpload {
        content_type: content_type(&path).to_string(),
        bytes: read_bytes(&path).await?,
        file_name,
    })
}

fn content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|extension| extension.to_string_lossy().to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn image_types_follow_the_extension() {
        assert_eq!(content_type(Path::new("tee.PNG")), "image/png");
        assert_eq!(content_type(Path::new("tee.jpeg")), "image/jpeg");
        assert_eq!(content_type(Path::new("tee")), "application/octet-stream");
    }

    #[test]
    fn product_file_parses_korean_categories() -> TestResult {
        let product: ProductFile = serde_norway::from_str(
            "name: Oxford\n\
             price: \"39000\"\n\
             main_category: 상의\n\
             sub_category: 셔츠\n\
             image: oxford.png\n\
             options:\n  \
               - { color: blue, size: M, stock: \"7\" }\n",
        )?;

        assert_eq!(product.main_category, MainCategory::Tops);
        assert_eq!(product.sub_category, SubCategory::Shirt);
        assert_eq!(product.options.len(), 1);

        Ok(())
    }
}
