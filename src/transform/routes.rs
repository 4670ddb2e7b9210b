use crate::{
    dataset::Route,
    gtfs::GtfsRoute,
    operator::{LineColor, OperatorConfig},
    transform::qualify,
};

const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";

pub fn build_routes(config: &OperatorConfig, rows: &[GtfsRoute]) -> Vec<Route> {
    rows.iter().map(|row| build_route(config, row)).collect()
}

fn build_route(config: &OperatorConfig, row: &GtfsRoute) -> Route {
    let short_name = row
        .route_short_name
        .clone()
        .unwrap_or_else(|| row.route_id.clone());
    let long_name = row.route_long_name.clone().unwrap_or_default();
    let LineColor { color, text_color } = resolve_color(config, row, &short_name, &long_name);

    Route {
        id: qualify(&config.id, &row.route_id),
        system_id: config.id.clone(),
        short_name,
        long_name,
        color,
        text_color,
        mode: config.mode,
        station_order: None,
        peak_headway_minutes: None,
        off_peak_headway_minutes: None,
    }
}

/// Operator palette first, then the feed's own colors, then the operator
/// default.
fn resolve_color(
    config: &OperatorConfig,
    row: &GtfsRoute,
    short_name: &str,
    long_name: &str,
) -> LineColor {
    if let Some(line_color) = config.line_color(short_name, long_name) {
        return line_color.clone();
    }
    LineColor {
        color: hex(row.route_color.as_deref()).unwrap_or_else(|| config.color.clone()),
        text_color: hex(row.route_text_color.as_deref())
            .unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string()),
    }
}

/// Feeds store colors without the leading `#`, a few add it anyway.
fn hex(value: Option<&str>) -> Option<String> {
    let value = value?.trim().trim_start_matches('#');
    if value.is_empty() {
        None
    } else {
        Some(format!("#{value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::Mode;

    fn row(id: &str, short: Option<&str>, long: Option<&str>, color: Option<&str>) -> GtfsRoute {
        GtfsRoute {
            route_id: id.into(),
            route_short_name: short.map(Into::into),
            route_long_name: long.map(Into::into),
            route_color: color.map(Into::into),
            route_text_color: None,
        }
    }

    fn config() -> OperatorConfig {
        OperatorConfig::new("rail", "Rail", "Agency", Mode::Rail, "#003366").with_line_colors([
            ("NEC", "#D21034", "#FFFFFF"),
            ("Main Line", "#FFD700", "#000000"),
        ])
    }

    #[test]
    fn palette_beats_feed_color() {
        let routes = build_routes(&config(), &[row("1", Some("NEC"), None, Some("00FF00"))]);
        assert_eq!(routes[0].color, "#D21034");
        assert_eq!(routes[0].text_color, "#FFFFFF");
    }

    #[test]
    fn long_name_is_second_palette_key() {
        let routes = build_routes(
            &config(),
            &[row("2", Some("XX"), Some("Main Line"), Some("00FF00"))],
        );
        assert_eq!(routes[0].color, "#FFD700");
        assert_eq!(routes[0].text_color, "#000000");
    }

    #[test]
    fn feed_color_then_operator_default() {
        let routes = build_routes(
            &config(),
            &[
                row("3", Some("Q"), None, Some("00FF00")),
                row("4", None, None, None),
            ],
        );
        assert_eq!(routes[0].color, "#00FF00");
        assert_eq!(routes[0].text_color, "#FFFFFF");
        assert_eq!(routes[1].color, "#003366");
    }

    #[test]
    fn feed_text_color_is_prefixed() {
        let mut dark = row("5", Some("Z"), None, Some("FFFF00"));
        dark.route_text_color = Some("000000".into());
        let mut hashed = row("6", Some("Y"), None, None);
        hashed.route_text_color = Some("#333333".into());
        let routes = build_routes(&config(), &[dark, hashed]);
        assert_eq!(routes[0].color, "#FFFF00");
        assert_eq!(routes[0].text_color, "#000000");
        assert_eq!(routes[1].color, "#003366");
        assert_eq!(routes[1].text_color, "#333333");
    }

    #[test]
    fn names_default_and_id_is_qualified() {
        let routes = build_routes(&config(), &[row("GS", None, None, None)]);
        let route = &routes[0];
        assert_eq!(route.id, "rail:GS");
        assert_eq!(route.system_id, "rail");
        assert_eq!(route.short_name, "GS");
        assert_eq!(route.long_name, "");
        assert_eq!(route.mode, Mode::Rail);
        assert!(route.station_order.is_none());
    }
}
