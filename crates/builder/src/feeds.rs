/// Where each built-in system publishes its static feed.
pub struct Feed {
    pub id: &'static str,
    pub url: &'static str,
    /// Feeds that are often unreachable. A failure skips the system.
    pub optional: bool,
}

pub const FEEDS: &[Feed] = &[
    Feed {
        id: "subway",
        url: "http://web.mta.info/developers/data/nyct/subway/google_transit.zip",
        optional: false,
    },
    Feed {
        id: "lirr",
        url: "http://web.mta.info/developers/data/lirr/google_transit.zip",
        optional: false,
    },
    Feed {
        id: "metro-north",
        url: "http://web.mta.info/developers/data/mnr/google_transit.zip",
        optional: false,
    },
    Feed {
        id: "path",
        url: "https://github.com/transitland/gtfs-archives-not-hosted-elsewhere/raw/master/path-nj-us.zip",
        optional: false,
    },
    Feed {
        id: "nyc-ferry",
        url: "http://nycferry.connexionz.net/rtt/public/utility/gtfs.aspx",
        optional: true,
    },
    Feed {
        id: "nj-transit-rail",
        url: "https://www.njtransit.com/rail_data.zip",
        optional: false,
    },
    Feed {
        id: "staten-island-ferry",
        url: "https://data.cityofnewyork.us/api/views/b57i-ri22/files/data?accessType=DOWNLOAD&filename=Staten_Island_Ferry_GTFS.zip",
        optional: true,
    },
];

pub fn find(id: &str) -> Option<&'static Feed> {
    FEEDS.iter().find(|feed| feed.id == id)
}
