use super::{Mode, OperatorConfig};

const WHITE: &str = "#FFFFFF";
const BLACK: &str = "#000000";

pub(super) fn operators() -> Vec<OperatorConfig> {
    vec![
        subway(),
        lirr(),
        metro_north(),
        path(),
        nyc_ferry(),
        staten_island_ferry(),
        nj_transit_rail(),
    ]
}

fn subway() -> OperatorConfig {
    OperatorConfig::new("subway", "NYC Subway", "MTA", Mode::Subway, "#0039A6")
        .enabled(true)
        .with_line_colors([
            // Eighth Avenue
            ("A", "#0039A6", WHITE),
            ("C", "#0039A6", WHITE),
            ("E", "#0039A6", WHITE),
            // Sixth Avenue
            ("B", "#FF6319", WHITE),
            ("D", "#FF6319", WHITE),
            ("F", "#FF6319", WHITE),
            ("M", "#FF6319", WHITE),
            ("G", "#6CBE45", WHITE),
            ("L", "#A7A9AC", BLACK),
            ("J", "#996633", WHITE),
            ("Z", "#996633", WHITE),
            // Broadway
            ("N", "#FCCC0A", BLACK),
            ("Q", "#FCCC0A", BLACK),
            ("R", "#FCCC0A", BLACK),
            ("W", "#FCCC0A", BLACK),
            // Broadway-Seventh Avenue
            ("1", "#EE352E", WHITE),
            ("2", "#EE352E", WHITE),
            ("3", "#EE352E", WHITE),
            // Lexington Avenue
            ("4", "#00933C", WHITE),
            ("5", "#00933C", WHITE),
            ("6", "#00933C", WHITE),
            ("7", "#B933AD", WHITE),
            // Shuttles
            ("S", "#808183", WHITE),
            ("FS", "#808183", WHITE),
            ("GS", "#808183", WHITE),
            ("H", "#808183", WHITE),
            ("SIR", "#0039A6", WHITE),
        ])
}

fn lirr() -> OperatorConfig {
    OperatorConfig::new("lirr", "Long Island Rail Road", "MTA", Mode::Rail, "#0039A6")
        .with_line_colors([
            ("Babylon", "#00985F", WHITE),
            ("City Terminal Zone", "#4D5357", WHITE),
            ("Far Rockaway", "#6E3219", WHITE),
            ("Hempstead", "#CE8E00", BLACK),
            ("Long Beach", "#FF6319", WHITE),
            ("Montauk", "#00B2A9", WHITE),
            ("Oyster Bay", "#00AF3F", WHITE),
            ("Port Jefferson", "#006EC7", WHITE),
            ("Port Washington", "#C60C30", WHITE),
            ("Ronkonkoma", "#A626AA", WHITE),
            ("West Hempstead", "#00A1DE", WHITE),
        ])
}

fn metro_north() -> OperatorConfig {
    OperatorConfig::new(
        "metro-north",
        "Metro-North Railroad",
        "MTA",
        Mode::Rail,
        "#0039A6",
    )
    .with_line_colors([
        ("Hudson", "#009B3A", WHITE),
        ("Harlem", "#0039A6", WHITE),
        ("New Haven", "#EE0034", WHITE),
        ("New Canaan", "#EE0034", WHITE),
        ("Danbury", "#EE0034", WHITE),
        ("Waterbury", "#EE0034", WHITE),
        ("Pascack Valley", "#8E258D", WHITE),
        ("Port Jervis", "#FF7900", WHITE),
    ])
}

fn path() -> OperatorConfig {
    OperatorConfig::new("path", "PATH", "Port Authority", Mode::Subway, "#E66B00")
        .with_line_colors([
            ("Newark-World Trade Center", "#D93A30", WHITE),
            ("Hoboken-World Trade Center", "#009E58", WHITE),
            ("Journal Square-33rd Street", "#FDB827", BLACK),
            ("Hoboken-33rd Street", "#2E3E93", WHITE),
            ("NWK", "#D93A30", WHITE),
            ("WTC", "#D93A30", WHITE),
            ("HOB", "#009E58", WHITE),
            ("JSQ", "#FDB827", BLACK),
            ("33S", "#2E3E93", WHITE),
        ])
}

fn nyc_ferry() -> OperatorConfig {
    OperatorConfig::new("nyc-ferry", "NYC Ferry", "NYC Ferry", Mode::Ferry, "#F7931E")
        .with_line_colors([
            ("Astoria", "#0095DA", WHITE),
            ("East River", "#00B2A9", WHITE),
            ("Rockaway", "#F15A29", WHITE),
            ("South Brooklyn", "#FCCC0A", BLACK),
            ("Soundview", "#5C4084", WHITE),
            ("St. George", "#009B3A", WHITE),
            ("Governors Island", "#ED1C24", WHITE),
        ])
}

fn staten_island_ferry() -> OperatorConfig {
    OperatorConfig::new(
        "staten-island-ferry",
        "Staten Island Ferry",
        "NYC DOT",
        Mode::Ferry,
        "#FF6600",
    )
}

fn nj_transit_rail() -> OperatorConfig {
    OperatorConfig::new(
        "nj-transit-rail",
        "NJ Transit Rail",
        "NJ Transit",
        Mode::Rail,
        "#003366",
    )
    // Feeds abbreviate some long names, both spellings are listed.
    .with_line_colors([
        ("Northeast Corrdr", "#D21034", WHITE),
        ("Northeast Corridor", "#D21034", WHITE),
        ("No Jersey Coast", "#FF6600", WHITE),
        ("North Jersey Coast", "#FF6600", WHITE),
        ("Raritan Valley", "#0066CC", WHITE),
        ("Main/Bergen", "#FFD700", BLACK),
        ("Main Line", "#FFD700", BLACK),
        ("Bergen County Line", "#FFD700", BLACK),
        ("Montclr-Boonton", "#00AA44", WHITE),
        ("Montclair-Boonton", "#00AA44", WHITE),
        ("Morris & Essex", "#7B2D8E", WHITE),
        ("Morristown Line", "#7B2D8E", WHITE),
        ("Gladstone Branch", "#7B2D8E", WHITE),
        ("Pascack Valley", "#8B4513", WHITE),
        ("Atlantic City", "#00BFFF", WHITE),
        ("Atlantic City Line", "#00BFFF", WHITE),
        ("NEC", "#D21034", WHITE),
        ("NJCL", "#FF6600", WHITE),
        ("RVL", "#0066CC", WHITE),
        ("M&E", "#7B2D8E", WHITE),
        ("MOBO", "#00AA44", WHITE),
        ("PVL", "#8B4513", WHITE),
        ("ACL", "#00BFFF", WHITE),
    ])
}
