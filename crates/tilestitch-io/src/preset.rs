//! Named tile-server presets.

/// A named tile source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Name accepted in place of a URL template.
    pub name: &'static str,
    /// One-line description for listings.
    pub description: &'static str,
    /// URL template with `{z}`, `{x}`, `{y}` tokens.
    pub template: &'static str,
}

/// All known presets, in listing order.
pub static PRESETS: &[Preset] = &[
    Preset {
        name: "aws:terrarium",
        description: "Amazon AWS open elevation map (Terrarium format)",
        template: "https://s3.amazonaws.com/elevation-tiles-prod/terrarium/{z}/{x}/{y}.png",
    },
    Preset {
        name: "aws:normal",
        description: "Amazon AWS open elevation map (normal vector format)",
        template: "https://s3.amazonaws.com/elevation-tiles-prod/normal/{z}/{x}/{y}.png",
    },
    Preset {
        name: "gmaps",
        description: "Google Maps standard road map",
        template: "http://mt.google.com/vt/lyrs=m&x={x}&y={y}&z={z}",
    },
    Preset {
        name: "gmaps:satellite",
        description: "Google Maps satellite imagery",
        template: "http://mt.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
    },
    Preset {
        name: "gmaps:hybrid",
        description: "Google Maps hybrid map",
        template: "http://mt.google.com/vt/lyrs=y&x={x}&y={y}&z={z}",
    },
    Preset {
        name: "ocm",
        description: "OpenCycleMaps tiles (watermarked)",
        template: "http://tile.thunderforest.com/cycle/{z}/{x}/{y}.png",
    },
    Preset {
        name: "osm",
        description: "OpenStreetMaps standard tiles",
        template: "http://tile.openstreetmap.org/{z}/{x}/{y}.png",
    },
    Preset {
        name: "stamen:terrain",
        description: "Stamen terrain tiles",
        template: "http://tile.stamen.com/terrain/{z}/{x}/{y}.jpg",
    },
    Preset {
        name: "stamen:toner",
        description: "Stamen toner tiles",
        template: "http://tile.stamen.com/toner/{z}/{x}/{y}.png",
    },
    Preset {
        name: "stamen:watercolor",
        description: "Stamen watercolor tiles",
        template: "http://tile.stamen.com/watercolor/{z}/{x}/{y}.jpg",
    },
    Preset {
        name: "tf:landscape",
        description: "Thunderforest landscape map tiles (watermarked)",
        template: "http://tile.thunderforest.com/landscape/{z}/{x}/{y}.png",
    },
    Preset {
        name: "tf:outdoors",
        description: "Thunderforest outdoors map tiles (watermarked)",
        template: "http://tile.thunderforest.com/outdoors/{z}/{x}/{y}.png",
    },
    Preset {
        name: "tf:transport",
        description: "Thunderforest transport map tiles (watermarked)",
        template: "http://tile.thunderforest.com/transport/{z}/{x}/{y}.png",
    },
];

/// Look up a preset by exact name.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.name == name)
}

/// Resolve a source argument: a preset name becomes its template, anything
/// else is taken as a literal template.
pub fn resolve_source(source: &str) -> &str {
    find_preset(source).map_or(source, |preset| preset.template)
}
