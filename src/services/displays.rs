//! Display enumeration

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::{
    constants::{DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH},
    overlay::{Display, Rect},
};

/// Detect the connected displays with `xrandr --listmonitors`.
///
/// Falls back to a single default display when detection fails.
pub async fn detect_displays() -> Vec<Display> {
    match query_xrandr().await {
        Ok(displays) if !displays.is_empty() => {
            info!("Detected {} display(s)", displays.len());
            displays
        }
        Ok(_) => {
            warn!("xrandr reported no monitors, using a single default display");
            synthetic_displays(1)
        }
        Err(e) => {
            warn!("Display detection failed: {}, using a single default display", e);
            synthetic_displays(1)
        }
    }
}

async fn query_xrandr() -> Result<Vec<Display>, String> {
    let output = Command::new("xrandr")
        .arg("--listmonitors")
        .output()
        .await
        .map_err(|e| format!("Failed to execute xrandr: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("xrandr failed: {}", stderr.trim()));
    }

    Ok(parse_monitor_list(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse `xrandr --listmonitors` output. A `*` before the name marks the primary display.
///
/// ```text
/// Monitors: 2
///  0: +*DP-1 1920/527x1080/296+0+0  DP-1
///  1: +HDMI-1 2560/597x1440/336+1920+0  HDMI-1
/// ```
pub fn parse_monitor_list(output: &str) -> Vec<Display> {
    let mut displays: Vec<Display> = output
        .lines()
        .filter_map(|line| {
            let parsed = parse_monitor_line(line);
            if parsed.is_none() && !line.trim_start().starts_with("Monitors:") {
                debug!("Skipping xrandr line: {:?}", line);
            }
            parsed
        })
        .collect();

    if !displays.is_empty() && !displays.iter().any(|d| d.primary) {
        displays[0].primary = true;
    }
    displays
}

fn parse_monitor_line(line: &str) -> Option<Display> {
    let mut tokens = line.split_whitespace();
    tokens.next()?.strip_suffix(':')?;

    let flagged_name = tokens.next()?;
    let primary = flagged_name.contains('*');
    let name = flagged_name.trim_start_matches(['+', '*']);

    // WIDTH/mmxHEIGHT/mm+X+Y
    let geometry = tokens.next()?;
    let (width_part, rest) = geometry.split_once('x')?;
    let width = width_part.split('/').next()?.parse().ok()?;

    let mut fields = rest.split('+');
    let height = fields.next()?.split('/').next()?.parse().ok()?;
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;

    Some(Display::new(name, Rect { x, y, width, height }, primary))
}

/// `count` default-sized displays side by side, the first one primary
pub fn synthetic_displays(count: usize) -> Vec<Display> {
    (0..count.max(1))
        .map(|i| {
            Display::new(
                format!("display-{}", i),
                Rect {
                    x: (i as u32 * DEFAULT_DISPLAY_WIDTH) as i32,
                    y: 0,
                    width: DEFAULT_DISPLAY_WIDTH,
                    height: DEFAULT_DISPLAY_HEIGHT,
                },
                i == 0,
            )
        })
        .collect()
}
