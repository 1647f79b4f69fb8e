use crate::globe::lod::LineString;
use crate::globe::marker::Marker;

// Rough continent outlines as closed rings of (lon, lat)
const OUTLINES: &[&[(f64, f64)]] = &[
    // North America
    &[
        (-166.0, 68.5), (-156.5, 71.3), (-141.0, 69.6), (-128.0, 70.0), (-115.0, 68.0),
        (-95.0, 71.0), (-82.0, 67.0), (-94.5, 59.0), (-88.0, 56.0), (-79.5, 51.5),
        (-78.0, 62.0), (-64.5, 60.3), (-56.0, 52.0), (-66.0, 45.0), (-70.5, 41.8),
        (-76.0, 35.2), (-81.2, 30.5), (-80.1, 25.5), (-82.8, 28.0), (-84.0, 30.0),
        (-89.5, 30.2), (-97.2, 27.8), (-97.5, 21.5), (-91.0, 19.0), (-87.0, 21.5),
        (-88.5, 15.8), (-83.2, 14.9), (-83.5, 10.5), (-77.5, 8.6), (-80.0, 7.3),
        (-86.0, 11.0), (-92.5, 14.5), (-105.5, 20.0), (-110.0, 24.0), (-114.5, 31.5),
        (-117.2, 32.7), (-120.6, 34.6), (-124.2, 40.4), (-124.6, 48.4), (-130.0, 54.7),
        (-136.5, 58.2), (-146.0, 60.5), (-152.0, 59.0), (-158.0, 56.5), (-163.0, 55.0),
        (-158.0, 58.8), (-165.0, 61.0), (-166.0, 68.5),
    ],
    // South America
    &[
        (-77.5, 8.6), (-72.0, 11.8), (-63.0, 10.7), (-52.0, 5.0), (-50.0, 0.0),
        (-44.0, -2.5), (-35.2, -5.5), (-39.0, -14.0), (-41.0, -22.0), (-48.5, -26.0),
        (-53.0, -33.5), (-58.0, -38.5), (-62.3, -40.8), (-65.0, -45.0), (-68.5, -51.0),
        (-68.6, -55.0), (-73.5, -53.0), (-75.0, -46.0), (-73.5, -37.0), (-71.5, -30.0),
        (-70.3, -18.5), (-76.3, -13.5), (-81.2, -5.8), (-80.0, -2.0), (-78.8, 1.5),
        (-77.5, 8.6),
    ],
    // Africa
    &[
        (-5.9, 35.8), (10.0, 37.2), (11.1, 33.0), (20.0, 30.8), (25.0, 31.6),
        (32.3, 31.2), (34.5, 27.8), (38.5, 18.0), (43.3, 12.6), (51.3, 11.8),
        (48.0, 5.0), (40.5, -2.5), (39.3, -8.0), (40.6, -15.5), (35.3, -22.5),
        (32.6, -28.5), (27.0, -33.9), (20.0, -34.8), (18.4, -34.0), (15.2, -27.0),
        (11.8, -17.0), (13.5, -11.0), (12.0, -5.0), (9.5, 1.0), (9.7, 4.0),
        (5.0, 5.8), (-1.5, 5.0), (-7.5, 4.4), (-13.2, 8.4), (-17.0, 14.7),
        (-16.5, 19.5), (-13.0, 27.5), (-9.8, 30.0), (-5.9, 35.8),
    ],
    // Eurasia
    &[
        (-9.5, 38.8), (-8.9, 43.0), (-1.4, 44.0), (-4.5, 48.5), (1.6, 50.9),
        (8.0, 53.6), (10.0, 57.5), (12.6, 55.7), (18.0, 59.4), (21.5, 65.0),
        (25.0, 65.5), (21.0, 60.5), (29.5, 60.0), (24.0, 57.0), (21.0, 56.5),
        (10.6, 59.0), (5.0, 61.5), (14.0, 67.5), (25.0, 71.0), (41.0, 67.0),
        (44.0, 68.5), (60.0, 69.5), (69.0, 73.0), (80.0, 73.5), (104.0, 77.7),
        (113.0, 73.5), (140.0, 72.5), (160.0, 69.5), (180.0, 68.5), (178.0, 64.5),
        (163.0, 60.0), (156.5, 51.0), (155.0, 59.0), (142.0, 59.0), (135.0, 54.5),
        (141.0, 52.5), (131.5, 42.8), (129.5, 35.2), (126.3, 34.6), (125.0, 39.5),
        (121.5, 39.0), (117.7, 39.0), (122.0, 37.0), (119.5, 34.5), (121.9, 30.9),
        (119.5, 25.5), (113.8, 22.2), (108.5, 21.6), (106.5, 18.0), (109.3, 12.0),
        (105.0, 8.7), (100.5, 13.5), (100.3, 6.5), (103.5, 1.3), (98.5, 8.0),
        (97.5, 16.5), (94.3, 16.0), (91.8, 22.3), (86.5, 20.3), (80.3, 15.5),
        (79.8, 10.3), (77.0, 8.1), (73.0, 17.0), (72.5, 21.5), (66.5, 25.4),
        (57.3, 25.8), (56.3, 27.2), (50.0, 30.0), (48.0, 29.5), (51.6, 24.5),
        (56.4, 26.3), (59.8, 22.5), (55.0, 17.0), (45.0, 12.8), (42.6, 16.5),
        (39.0, 21.5), (35.0, 28.0), (34.2, 31.3), (36.0, 35.5), (30.5, 36.5),
        (26.3, 39.5), (29.0, 41.0), (41.5, 41.5), (36.0, 45.0), (30.7, 46.5),
        (28.7, 44.0), (23.8, 38.0), (21.0, 39.5), (19.4, 41.8), (15.3, 45.0),
        (12.3, 45.3), (16.5, 41.2), (15.7, 38.0), (10.0, 44.0), (3.2, 43.3),
        (0.0, 38.8), (-2.0, 36.7), (-5.6, 36.0), (-9.5, 38.8),
    ],
    // Australia
    &[
        (113.6, -22.0), (122.0, -18.0), (129.5, -15.0), (136.8, -12.0), (141.5, -12.5),
        (142.5, -10.7), (145.5, -15.0), (153.0, -25.0), (153.5, -28.5), (150.0, -37.5),
        (146.3, -39.0), (140.5, -38.0), (137.5, -35.5), (131.0, -31.5), (124.0, -33.0),
        (115.0, -34.3), (115.0, -29.0), (113.6, -22.0),
    ],
    // Greenland
    &[
        (-73.0, 78.5), (-58.0, 82.0), (-30.0, 83.5), (-18.0, 81.0), (-21.0, 72.0),
        (-32.0, 68.0), (-42.0, 60.0), (-50.0, 64.0), (-54.0, 70.5), (-60.0, 76.0),
        (-73.0, 78.5),
    ],
    // Antarctica, kept off the pole so the ring stays well-formed
    &[
        (-180.0, -78.0), (-150.0, -77.0), (-120.0, -73.5), (-90.0, -72.5), (-62.0, -64.5),
        (-57.0, -63.5), (-45.0, -78.0), (-20.0, -73.0), (0.0, -70.0), (30.0, -69.5),
        (60.0, -67.0), (90.0, -66.5), (120.0, -66.5), (150.0, -68.5), (165.0, -72.0),
        (170.0, -77.5), (180.0, -78.0),
    ],
    // Great Britain
    &[
        (-5.7, 50.0), (1.4, 51.2), (1.7, 52.7), (0.0, 53.5), (-1.6, 55.6),
        (-2.0, 57.6), (-3.0, 58.6), (-5.0, 58.6), (-6.2, 56.5), (-4.9, 54.8),
        (-3.0, 53.5), (-4.6, 52.0), (-5.7, 50.0),
    ],
    // Japan
    &[
        (130.0, 31.0), (131.9, 33.9), (135.0, 33.5), (140.0, 35.0), (141.0, 38.5),
        (141.5, 41.4), (140.0, 40.5), (139.8, 38.0), (136.8, 37.2), (133.0, 35.5),
        (130.0, 33.8), (130.0, 31.0),
    ],
];

/// Coarse world outlines used when no GeoJSON is available.
pub fn builtin_land() -> Vec<LineString> {
    OUTLINES.iter().map(|ring| ring.to_vec()).collect()
}

/// A handful of major cities.
pub fn builtin_markers() -> Vec<Marker> {
    [
        (-74.006, 40.713, "New York", 18_800_000),
        (-118.244, 34.052, "Los Angeles", 12_400_000),
        (-99.133, 19.433, "Mexico City", 21_800_000),
        (-46.633, -23.550, "São Paulo", 22_400_000),
        (-58.382, -34.604, "Buenos Aires", 15_400_000),
        (-0.128, 51.507, "London", 9_500_000),
        (2.352, 48.857, "Paris", 11_100_000),
        (37.618, 55.756, "Moscow", 12_600_000),
        (31.236, 30.044, "Cairo", 21_300_000),
        (3.379, 6.524, "Lagos", 15_400_000),
        (36.817, -1.286, "Nairobi", 4_700_000),
        (18.424, -33.925, "Cape Town", 4_800_000),
        (72.878, 19.076, "Mumbai", 20_700_000),
        (77.209, 28.614, "Delhi", 32_900_000),
        (116.407, 39.904, "Beijing", 21_800_000),
        (121.474, 31.230, "Shanghai", 28_500_000),
        (139.692, 35.690, "Tokyo", 37_200_000),
        (103.820, 1.352, "Singapore", 5_900_000),
        (151.209, -33.869, "Sydney", 5_300_000),
        (174.763, -36.848, "Auckland", 1_700_000),
    ]
    .into_iter()
    .map(|(lon, lat, name, count)| Marker::new(lon, lat).with_label(name).with_count(count))
    .collect()
}
