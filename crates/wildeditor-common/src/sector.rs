//! Sector identifiers understood by the game world.

use serde::{Deserialize, Serialize};

use crate::error::RangeWarning;
use crate::ids::RecordKind;

/// Lowest valid sector identifier.
pub const SECTOR_MIN: i32 = 0;

/// Highest valid sector identifier.
pub const SECTOR_MAX: i32 = 36;

/// Raw sector identifier as stored in region and path props.
///
/// Values outside [`SECTOR_MIN`]..=[`SECTOR_MAX`] are kept as-is; use
/// [`SectorId::check`] to report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorId(i32);

impl SectorId {
    /// Creates a sector id from a raw value.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns true if the value names a known sector.
    #[must_use]
    pub const fn is_known(self) -> bool {
        self.0 >= SECTOR_MIN && self.0 <= SECTOR_MAX
    }

    /// Looks up the named sector type.
    #[must_use]
    pub fn sector_type(self) -> Option<SectorType> {
        SectorType::from_id(self.0)
    }

    /// Display name, or `"Unknown"` for out-of-range values.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.sector_type().map_or("Unknown", SectorType::name)
    }

    /// Returns a warning if the value is outside the known range.
    #[must_use]
    pub fn check(self, kind: RecordKind, vnum: i32) -> Option<RangeWarning> {
        (!self.is_known()).then_some(RangeWarning::SectorOutOfRange {
            kind,
            vnum,
            value: self.0,
        })
    }
}

impl From<SectorType> for SectorId {
    fn from(sector: SectorType) -> Self {
        Self(sector as i32)
    }
}

impl std::fmt::Display for SectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.0, self.name())
    }
}

/// Terrain types of the wilderness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum SectorType {
    /// Indoors
    Inside = 0,
    /// City streets
    City = 1,
    /// Open field
    Field = 2,
    /// Forest
    Forest = 3,
    /// Hills
    Hills = 4,
    /// Mountains
    Mountains = 5,
    /// Swimmable water
    WaterSwim = 6,
    /// Water that needs a boat
    WaterNoSwim = 7,
    /// In the air
    Flying = 8,
    /// Under water
    Underwater = 9,
    /// Entrance to a zone
    ZoneEntrance = 10,
    /// Road running north-south
    RoadNorthSouth = 11,
    /// Road running east-west
    RoadEastWest = 12,
    /// Road crossing
    RoadIntersection = 13,
    /// Desert
    Desert = 14,
    /// Open ocean
    Ocean = 15,
    /// Marshland
    Marshland = 16,
    /// High mountains
    HighMountain = 17,
    /// Outer planes
    OuterPlanes = 18,
    /// Underdark wilderness
    UnderdarkWild = 19,
    /// Underdark city
    UnderdarkCity = 20,
    /// Underdark indoors
    UnderdarkInside = 21,
    /// Underdark swimmable water
    UnderdarkWaterSwim = 22,
    /// Underdark water that needs a boat
    UnderdarkWaterNoSwim = 23,
    /// Underdark chasm
    UnderdarkNoGround = 24,
    /// Lava
    Lava = 25,
    /// Dirt road running north-south
    DirtRoadNorthSouth = 26,
    /// Dirt road running east-west
    DirtRoadEastWest = 27,
    /// Dirt road crossing
    DirtRoadIntersection = 28,
    /// Cave
    Cave = 29,
    /// Jungle
    Jungle = 30,
    /// Tundra
    Tundra = 31,
    /// Taiga
    Taiga = 32,
    /// Beach
    Beach = 33,
    /// Sea port
    SeaPort = 34,
    /// Inside room
    InsideRoom = 35,
    /// River
    River = 36,
}

impl SectorType {
    const ALL: [Self; 37] = [
        Self::Inside,
        Self::City,
        Self::Field,
        Self::Forest,
        Self::Hills,
        Self::Mountains,
        Self::WaterSwim,
        Self::WaterNoSwim,
        Self::Flying,
        Self::Underwater,
        Self::ZoneEntrance,
        Self::RoadNorthSouth,
        Self::RoadEastWest,
        Self::RoadIntersection,
        Self::Desert,
        Self::Ocean,
        Self::Marshland,
        Self::HighMountain,
        Self::OuterPlanes,
        Self::UnderdarkWild,
        Self::UnderdarkCity,
        Self::UnderdarkInside,
        Self::UnderdarkWaterSwim,
        Self::UnderdarkWaterNoSwim,
        Self::UnderdarkNoGround,
        Self::Lava,
        Self::DirtRoadNorthSouth,
        Self::DirtRoadEastWest,
        Self::DirtRoadIntersection,
        Self::Cave,
        Self::Jungle,
        Self::Tundra,
        Self::Taiga,
        Self::Beach,
        Self::SeaPort,
        Self::InsideRoom,
        Self::River,
    ];

    /// All sector types in id order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &Self::ALL
    }

    /// Looks up a sector type by id.
    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Numeric id.
    #[must_use]
    pub const fn id(self) -> i32 {
        self as i32
    }

    /// Display name used by the editor.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inside => "Inside",
            Self::City => "City",
            Self::Field => "Field",
            Self::Forest => "Forest",
            Self::Hills => "Hills",
            Self::Mountains => "Mountains",
            Self::WaterSwim => "Water (Swim)",
            Self::WaterNoSwim => "Water (No Swim)",
            Self::Flying => "Flying",
            Self::Underwater => "Underwater",
            Self::ZoneEntrance => "Zone Entrance",
            Self::RoadNorthSouth => "Road North-South",
            Self::RoadEastWest => "Road East-West",
            Self::RoadIntersection => "Road Intersection",
            Self::Desert => "Desert",
            Self::Ocean => "Ocean",
            Self::Marshland => "Marshland",
            Self::HighMountain => "High Mountain",
            Self::OuterPlanes => "Outer Planes",
            Self::UnderdarkWild => "Underdark Wild",
            Self::UnderdarkCity => "Underdark City",
            Self::UnderdarkInside => "Underdark Inside",
            Self::UnderdarkWaterSwim => "Underdark Water (Swim)",
            Self::UnderdarkWaterNoSwim => "Underdark Water (No Swim)",
            Self::UnderdarkNoGround => "Underdark No Ground",
            Self::Lava => "Lava",
            Self::DirtRoadNorthSouth => "Dirt Road North-South",
            Self::DirtRoadEastWest => "Dirt Road East-West",
            Self::DirtRoadIntersection => "Dirt Road Intersection",
            Self::Cave => "Cave",
            Self::Jungle => "Jungle",
            Self::Tundra => "Tundra",
            Self::Taiga => "Taiga",
            Self::Beach => "Beach",
            Self::SeaPort => "Sea Port",
            Self::InsideRoom => "Inside Room",
            Self::River => "River",
        }
    }
}
