/// First port tried by `safari preview`.
pub const PORT: u16 = 1864;
