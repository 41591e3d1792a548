//! Built-in SYSCOHADA fixed-asset table.
//!
//! Rates are stored in hundredths of a percent so the table can stay a
//! `const` array; `classifications()` expands it into owned values.

use rust_decimal::Decimal;

use crate::classification::{AssetClassification, RateRange, YearRange};

const INTANGIBLES: &str = "21 - Immobilisations incorporelles";
const LAND: &str = "22 - Terrains";
const BUILDINGS: &str = "23 - Bâtiments, installations techniques et agencements";
const EQUIPMENT: &str = "24 - Matériel, mobilier et actifs biologiques";

struct Definition {
    class: &'static str,
    code: &'static str,
    category: &'static str,
    content: &'static str,
    /// (min, max, default) in years.
    life: (u32, u32, u32),
    /// (min, max, default) in hundredths of a percent.
    rate: (i64, i64, i64),
    examples: &'static [&'static str],
    account: &'static str,
    depreciation_account: &'static str,
    equivalents: &'static [&'static str],
}

const DEFINITIONS: &[Definition] = &[
    Definition {
        class: INTANGIBLES,
        code: "211",
        category: "Frais de développement",
        content: "Dépenses de développement de projets identifiables et rentables",
        life: (2, 5, 5),
        rate: (2000, 5000, 2000),
        examples: &["developpement", "prototype", "recherche appliquee"],
        account: "211",
        depreciation_account: "2811",
        equivalents: &["203"],
    },
    Definition {
        class: INTANGIBLES,
        code: "212",
        category: "Brevets, licences, concessions et droits similaires",
        content: "Droits de propriété industrielle acquis ou concédés",
        life: (5, 20, 10),
        rate: (500, 2000, 1000),
        examples: &["brevet", "licence", "concession", "droit d'exploitation", "marque"],
        account: "212",
        depreciation_account: "2812",
        equivalents: &["205"],
    },
    Definition {
        class: INTANGIBLES,
        code: "213",
        category: "Logiciels et sites internet",
        content: "Logiciels acquis ou créés, sites internet",
        life: (1, 5, 3),
        rate: (2000, 10000, 3333),
        examples: &[
            "logiciel",
            "progiciel",
            "site internet",
            "site web",
            "erp",
            "licence logicielle",
        ],
        account: "213",
        depreciation_account: "2813",
        equivalents: &[],
    },
    Definition {
        class: INTANGIBLES,
        code: "215",
        category: "Fonds commercial",
        content: "Clientèle, achalandage, droit au bail non amortissables",
        life: (0, 0, 0),
        rate: (0, 0, 0),
        examples: &["fonds commercial", "fonds de commerce", "droit au bail"],
        account: "215",
        depreciation_account: "2915",
        equivalents: &["207"],
    },
    Definition {
        class: LAND,
        code: "221",
        category: "Terrains agricoles et forestiers",
        content: "Terres cultivables, forêts et plantations",
        life: (0, 0, 0),
        rate: (0, 0, 0),
        examples: &["terrain agricole", "foret", "terre cultivable"],
        account: "221",
        depreciation_account: "2921",
        equivalents: &[],
    },
    Definition {
        class: LAND,
        code: "222",
        category: "Terrains nus",
        content: "Terrains non bâtis, parcelles et lotissements",
        life: (0, 0, 0),
        rate: (0, 0, 0),
        examples: &["terrain nu", "parcelle", "lotissement"],
        account: "222",
        depreciation_account: "2922",
        equivalents: &[],
    },
    Definition {
        class: LAND,
        code: "223",
        category: "Terrains bâtis",
        content: "Assiette foncière des constructions",
        life: (0, 0, 0),
        rate: (0, 0, 0),
        examples: &["terrain bati"],
        account: "223",
        depreciation_account: "2923",
        equivalents: &[],
    },
    Definition {
        class: LAND,
        code: "224",
        category: "Travaux de mise en valeur des terrains",
        content: "Viabilisation, drainage, clôtures et voiries privées",
        life: (10, 20, 15),
        rate: (500, 1000, 667),
        examples: &["mise en valeur", "viabilisation", "drainage", "cloture"],
        account: "224",
        depreciation_account: "2824",
        equivalents: &[],
    },
    Definition {
        class: BUILDINGS,
        code: "231",
        category: "Bâtiments industriels, agricoles, administratifs et commerciaux sur sol propre",
        content: "Constructions édifiées sur un terrain appartenant à l'entité",
        life: (20, 50, 25),
        rate: (200, 500, 400),
        examples: &["batiment", "immeuble", "entrepot", "hangar", "construction"],
        account: "231",
        depreciation_account: "2831",
        equivalents: &[],
    },
    Definition {
        class: BUILDINGS,
        code: "232",
        category: "Bâtiments industriels, agricoles, administratifs et commerciaux sur sol d'autrui",
        content: "Constructions édifiées sur un terrain loué ou concédé",
        life: (10, 30, 20),
        rate: (333, 1000, 500),
        examples: &["sol d'autrui", "terrain loue", "bail a construction"],
        account: "232",
        depreciation_account: "2832",
        equivalents: &[],
    },
    Definition {
        class: BUILDINGS,
        code: "234",
        category: "Aménagements, agencements et installations techniques",
        content: "Installations techniques attachées aux bâtiments",
        life: (5, 20, 10),
        rate: (500, 2000, 1000),
        examples: &[
            "installation technique",
            "climatisation",
            "ascenseur",
            "groupe electrogene",
            "installation electrique",
        ],
        account: "234",
        depreciation_account: "2834",
        equivalents: &[],
    },
    Definition {
        class: BUILDINGS,
        code: "235",
        category: "Aménagements de bureaux",
        content: "Cloisons, faux plafonds et agencements des locaux de bureau",
        life: (5, 10, 10),
        rate: (1000, 2000, 1000),
        examples: &["amenagement de bureau", "cloison", "faux plafond", "renovation des locaux"],
        account: "235",
        depreciation_account: "2835",
        equivalents: &[],
    },
    Definition {
        class: EQUIPMENT,
        code: "241",
        category: "Matériel et outillage industriel et commercial",
        content: "Machines, outillage et équipements de production ou de vente",
        life: (5, 10, 5),
        rate: (1000, 2000, 2000),
        examples: &[
            "machine",
            "outillage",
            "equipement industriel",
            "compresseur",
            "chariot elevateur",
        ],
        account: "241",
        depreciation_account: "2841",
        equivalents: &[],
    },
    Definition {
        class: EQUIPMENT,
        code: "242",
        category: "Matériel et outillage agricole",
        content: "Tracteurs, matériel de culture et d'irrigation",
        life: (5, 10, 8),
        rate: (1000, 2000, 1250),
        examples: &["tracteur", "motoculteur", "materiel agricole", "irrigation"],
        account: "242",
        depreciation_account: "2842",
        equivalents: &[],
    },
    Definition {
        class: EQUIPMENT,
        code: "243",
        category: "Matériel d'emballage récupérable et identifiable",
        content: "Palettes, conteneurs et emballages réutilisables",
        life: (2, 5, 3),
        rate: (2000, 5000, 3333),
        examples: &["palette", "conteneur", "emballage recuperable", "caisse"],
        account: "243",
        depreciation_account: "2843",
        equivalents: &["2186"],
    },
    Definition {
        class: EQUIPMENT,
        code: "2441",
        category: "Matériel de bureau",
        content: "Photocopieurs, téléphonie, coffres-forts et matériel de bureau",
        life: (5, 10, 5),
        rate: (1000, 2000, 2000),
        examples: &["photocopieur", "telephone", "standard telephonique", "coffre-fort", "destructeur"],
        account: "2441",
        depreciation_account: "28441",
        equivalents: &["2183"],
    },
    Definition {
        class: EQUIPMENT,
        code: "2442",
        category: "Matériel informatique",
        content: "Ordinateurs, serveurs, imprimantes et périphériques",
        life: (3, 5, 3),
        rate: (2000, 3333, 3333),
        examples: &[
            "ordinateur",
            "ordinateur portable",
            "laptop",
            "serveur",
            "imprimante",
            "onduleur",
        ],
        account: "2442",
        depreciation_account: "28442",
        equivalents: &["2183"],
    },
    Definition {
        class: EQUIPMENT,
        code: "2444",
        category: "Mobilier de bureau",
        content: "Bureaux, sièges, armoires et tables",
        life: (5, 10, 10),
        rate: (1000, 2000, 1000),
        examples: &["mobilier", "bureau", "chaise", "fauteuil", "armoire", "table de reunion"],
        account: "2444",
        depreciation_account: "28444",
        equivalents: &["2184"],
    },
    Definition {
        class: EQUIPMENT,
        code: "2446",
        category: "Matériel et mobilier des logements du personnel",
        content: "Équipement des logements mis à disposition du personnel",
        life: (5, 10, 10),
        rate: (1000, 2000, 1000),
        examples: &["electromenager", "refrigerateur", "literie", "mobilier de logement"],
        account: "2446",
        depreciation_account: "28446",
        equivalents: &[],
    },
    Definition {
        class: EQUIPMENT,
        code: "2451",
        category: "Matériel automobile",
        content: "Véhicules de tourisme et utilitaires",
        life: (4, 5, 4),
        rate: (2000, 2500, 2500),
        examples: &["vehicule", "voiture", "camion", "pick-up", "utilitaire", "4x4"],
        account: "2451",
        depreciation_account: "28451",
        equivalents: &["2182"],
    },
    Definition {
        class: EQUIPMENT,
        code: "246",
        category: "Actifs biologiques",
        content: "Cheptel reproducteur et plantations pérennes",
        life: (5, 30, 10),
        rate: (333, 2000, 1000),
        examples: &["cheptel", "betail", "plantation perenne", "verger"],
        account: "246",
        depreciation_account: "2846",
        equivalents: &[],
    },
    Definition {
        class: EQUIPMENT,
        code: "248",
        category: "Autres matériels et mobiliers",
        content: "Matériel audiovisuel et équipements divers",
        life: (5, 10, 5),
        rate: (1000, 2000, 2000),
        examples: &["audiovisuel", "camera", "videoprojecteur", "sonorisation"],
        account: "248",
        depreciation_account: "2848",
        equivalents: &["2188"],
    },
];

fn percent(hundredths: i64) -> Decimal {
    Decimal::new(hundredths, 2)
}

/// Expand the built-in table, in definition order.
pub fn classifications() -> Vec<AssetClassification> {
    DEFINITIONS
        .iter()
        .map(|d| AssetClassification {
            asset_class: d.class.to_string(),
            asset_category: d.category.to_string(),
            category_code: d.code.to_string(),
            content: d.content.to_string(),
            useful_life_years: YearRange {
                min: d.life.0,
                max: d.life.1,
            },
            depreciation_rate: RateRange {
                min: percent(d.rate.0),
                max: percent(d.rate.1),
            },
            default_useful_life: d.life.2,
            default_depreciation_rate: percent(d.rate.2),
            examples: d.examples.iter().map(|s| s.to_string()).collect(),
            syscohada_account: d.account.to_string(),
            depreciation_account: d.depreciation_account.to_string(),
            equivalent_accounts: d.equivalents.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}
