use idxsync_core::{bson::Document, Index};

use mongodb::{options::IndexOptions, IndexModel};

/// Builds the model used to create `index`.
pub(crate) fn index_to_model(index: &Index) -> IndexModel {
    let mut options = IndexOptions::default();
    options.name = index.name.clone();
    options.unique = Some(index.unique);

    IndexModel::builder()
        .keys(index.to_wire())
        .options(options)
        .build()
}

/// Renders a model reported by `listIndexes` as a native descriptor.
pub(crate) fn model_to_descriptor(model: &IndexModel) -> Document {
    let mut descriptor = Document::new();
    descriptor.insert("key", model.keys.clone());

    if let Some(options) = &model.options {
        if let Some(name) = &options.name {
            descriptor.insert("name", name.clone());
        }

        if let Some(unique) = options.unique {
            descriptor.insert("unique", unique);
        }
    }

    descriptor
}
