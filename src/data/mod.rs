/// Data layer: file-system facing pieces of the viewer.
///
/// Architecture:
/// ```text
///   picture directory
///        │
///        ▼
///   ┌──────────┐
///   │ siblings  │  list png/gif/jpg/jpeg/svg by name → neighbour path
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode file → DynamicImage, re-encode on save
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  Direction, FileProperties, status line
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod siblings;
