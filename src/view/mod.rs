pub mod columns;
pub mod presets;

pub use columns::{
    is_column_modifiable, reorder_columns, sanitize_columns, set_column_visible, visible_columns,
    ColumnDescriptor,
};
pub use presets::{
    OverviewOptions, OverviewOptionsPatch, PosterOptions, PosterOptionsPatch, PresetName,
    PresetOptionValue, PresetSize,
};
