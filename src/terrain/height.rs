use std::sync::OnceLock;

/// Supplies the default height of a ground level tile that has no explicit
/// height in its payload.
///
/// Implementations must be deterministic: the same absolute coordinates have
/// to produce the same height on every call. The returned value is in height
/// steps; the codec scales it to world units.
///
/// Closures implement the trait:
///
/// ```
/// use rscodec::terrain::HeightSource;
/// let flat = |_x: i32, _y: i32| 20;
/// assert_eq!(flat.height(1, 2), 20);
/// ```
pub trait HeightSource {
    fn height(&self, x: i32, y: i32) -> i32;
}

impl<F> HeightSource for F
where
    F: Fn(i32, i32) -> i32,
{
    fn height(&self, x: i32, y: i32) -> i32 {
        self(x, y)
    }
}

/// The game client's procedural height function: three octaves of
/// interpolated value noise, scaled and clamped to 10..=60.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassicNoise;

impl ClassicNoise {
    pub fn new() -> Self {
        ClassicNoise
    }
}

impl HeightSource for ClassicNoise {
    fn height(&self, x: i32, y: i32) -> i32 {
        let mut height = (interpolated_noise(x.wrapping_add(45365), y.wrapping_add(91923), 4)
            - 128)
            + ((interpolated_noise(x.wrapping_add(10294), y.wrapping_add(37821), 2) - 128) >> 1)
            + ((interpolated_noise(x, y, 1) - 128) >> 2);
        height = (f64::from(height) * 0.3) as i32 + 35;
        height.clamp(10, 60)
    }
}

fn cosine_table() -> &'static [i32; 2048] {
    static TABLE: OnceLock<[i32; 2048]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0; 2048];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = (65536.0 * (i as f64 * 0.003_067_961_5).cos()) as i32;
        }
        table
    })
}

fn interpolated_noise(x: i32, y: i32, frequency: i32) -> i32 {
    let (cell_x, frac_x) = (x / frequency, x & (frequency - 1));
    let (cell_y, frac_y) = (y / frequency, y & (frequency - 1));
    let bottom_left = smooth_noise(cell_x, cell_y);
    let bottom_right = smooth_noise(cell_x.wrapping_add(1), cell_y);
    let top_left = smooth_noise(cell_x, cell_y.wrapping_add(1));
    let top_right = smooth_noise(cell_x.wrapping_add(1), cell_y.wrapping_add(1));
    let bottom = interpolate(bottom_left, bottom_right, frac_x, frequency);
    let top = interpolate(top_left, top_right, frac_x, frequency);
    interpolate(bottom, top, frac_y, frequency)
}

fn interpolate(a: i32, b: i32, angle: i32, frequency: i32) -> i32 {
    let cosine = (0x10000 - cosine_table()[(angle * 1024 / frequency) as usize]) >> 1;
    ((a * (0x10000 - cosine)) >> 16) + ((b * cosine) >> 16)
}

fn smooth_noise(x: i32, y: i32) -> i32 {
    let n = |dx: i32, dy: i32| noise(x.wrapping_add(dx), y.wrapping_add(dy));
    let corners = n(-1, -1) + n(1, -1) + n(-1, 1) + n(1, 1);
    let sides = n(-1, 0) + n(1, 0) + n(0, -1) + n(0, 1);
    corners / 16 + sides / 8 + n(0, 0) / 4
}

fn noise(x: i32, y: i32) -> i32 {
    let mut n = x.wrapping_add(y.wrapping_mul(57));
    n ^= n.wrapping_shl(13);
    n = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15731).wrapping_add(0xc0ae5))
        .wrapping_add(0x5208dd0d)
        & 0x7fff_ffff;
    (n >> 19) & 0xff
}
