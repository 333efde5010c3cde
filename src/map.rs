/// Cluster map visualization

use crate::filesystem::cluster::ClusterType;
use crate::image::DiskImage;

/// ANSI color codes for the cluster map
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BRIGHT_WHITE: &str = "\x1b[97m";
    pub const DARK_WHITE: &str = "\x1b[37m";
    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_YELLOW: &str = "\x1b[93m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
    pub const BRIGHT_MAGENTA: &str = "\x1b[95m";
}

/// Clusters drawn per map line
pub const CLUSTERS_PER_LINE: usize = 32;

/// Map glyph for a cluster tag
fn glyph(tag: u8) -> (char, &'static str) {
    match ClusterType::try_from(tag) {
        Ok(ClusterType::Root) => ('R', colors::BRIGHT_CYAN),
        Ok(ClusterType::Empty) => ('.', colors::DARK_WHITE),
        Ok(ClusterType::Damaged) => ('X', colors::BRIGHT_RED),
        Ok(ClusterType::FileHeader) => ('H', colors::BRIGHT_YELLOW),
        Ok(ClusterType::FileData) => ('D', colors::BRIGHT_WHITE),
        Err(_) => ('?', colors::BRIGHT_MAGENTA),
    }
}

fn render(image: &DiskImage, color: bool) -> String {
    let mut out = String::new();

    for (line, rows) in image.rows().chunks(CLUSTERS_PER_LINE).enumerate() {
        out.push_str(&format!("{:02X} ", line * CLUSTERS_PER_LINE % 256));
        for row in rows {
            let (ch, code) = glyph(row[0]);
            if color {
                out.push_str(code);
                out.push(ch);
                out.push_str(colors::RESET);
            } else {
                out.push(ch);
            }
        }
        out.push('\n');
    }

    out
}

/// Render a plain cluster map, one glyph per cluster
///
/// `R` root, `.` empty, `X` damaged, `H` file header, `D` file data and `?`
/// for an unknown type. Each line starts with the number of its first cluster.
pub fn render_cluster_map(image: &DiskImage) -> String {
    render(image, false)
}

/// Draw a colored cluster map to stdout
pub fn draw_cluster_map(image: &DiskImage) {
    if image.is_empty() {
        println!("No clusters in image.");
        return;
    }

    println!("=== Cluster Map ===");
    println!(
        "Legend: {}R{} Root {}H{} Header {}D{} Data {}.{} Empty {}X{} Damaged {}?{} Unknown",
        colors::BRIGHT_CYAN, colors::RESET,
        colors::BRIGHT_YELLOW, colors::RESET,
        colors::BRIGHT_WHITE, colors::RESET,
        colors::DARK_WHITE, colors::RESET,
        colors::BRIGHT_RED, colors::RESET,
        colors::BRIGHT_MAGENTA, colors::RESET
    );
    println!();
    print!("{}", render(image, true));
}
