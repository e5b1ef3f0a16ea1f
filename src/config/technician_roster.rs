// ==========================================
// Fuel Ledger - Default technician roster
// ==========================================
// Responsibility: built-in technician -> site assignments
// Overridable through the `technicians` section of the config file
// ==========================================

use crate::config::ledger_config::TechnicianAssignment;

/// (technician, assigned site ids)
const ROSTER: &[(&str, &[&str])] = &[
    (
        "KAMBOLE",
        &[
            "IHS_CBT_002M", "IHS_CBT_005M", "IHS_CBT_011M", "IHS_CBT_013M",
            "IHS_CBT_015M", "IHS_CBT_017M", "IHS_CBT_023M", "IHS_CBT_025M",
            "IHS_CBT_029M", "IHS_CBT_031M", "IHS_CBT_037M", "IHS_CBT_041M",
            "IHS_CBT_072M", "IHS_CBT_216M", "IHS_CBT_218A", "IHS_CBT_219M",
            "IHS_CBT_220M", "IHS_CBT_222M", "IHS_CBT_226A", "IHS_CBT_226M",
            "IHS_CBT_233A", "IHS_CBT_245A", "IHS_CBT_257A", "IHS_CBT_264A",
            "IHS_CBT_291A", "IHS_CBT_335A", "IHS_CBT_344A", "IHS_CBT_347A",
            "IHS_CBT_359A", "IHS_CBT_360A", "IHS_CBT_361A", "IHS_CBT_364A",
            "IHS_CBT_378A", "IHS_CBT_390A",
        ],
    ),
    (
        "ROYD",
        &[
            "IHS_CBT_001M", "IHS_CBT_003M", "IHS_CBT_004M", "IHS_CBT_006M",
            "IHS_CBT_007M", "IHS_CBT_008M", "IHS_CBT_009M", "IHS_CBT_010M",
            "IHS_CBT_012M", "IHS_CBT_014M", "IHS_CBT_016M", "IHS_CBT_020M",
            "IHS_CBT_021M", "IHS_CBT_022M", "IHS_CBT_024M", "IHS_CBT_027M",
            "IHS_CBT_032M", "IHS_CBT_033M", "IHS_CBT_034M", "IHS_CBT_035M",
            "IHS_CBT_036M", "IHS_CBT_156M", "IHS_CBT_164M", "IHS_CBT_207A",
            "IHS_CBT_214A", "IHS_CBT_224M", "IHS_CBT_232A", "IHS_CBT_246A",
            "IHS_CBT_252A", "IHS_CBT_253A", "IHS_CBT_283A", "IHS_CBT_288A",
            "IHS_CBT_293A", "IHS_CBT_325A", "IHS_CBT_331A", "IHS_CBT_332A",
            "IHS_CBT_338A", "IHS_CBT_349A", "IHS_CBT_362A", "IHS_CBT_363A",
            "IHS_CBT_385A",
        ],
    ),
    (
        "FACKSON",
        &[
            "IHS_CBT_061M", "IHS_CBT_073M", "IHS_CBT_074M", "IHS_CBT_075M",
            "IHS_CBT_081M", "IHS_CBT_082M", "IHS_CBT_083M", "IHS_CBT_088M",
            "IHS_CBT_092M", "IHS_CBT_094M", "IHS_CBT_096M", "IHS_CBT_102M",
            "IHS_CBT_104M", "IHS_CBT_105M", "IHS_CBT_108M", "IHS_CBT_217A",
            "IHS_CBT_218M", "IHS_CBT_222A", "IHS_CBT_223M", "IHS_CBT_237A",
            "IHS_CBT_244A", "IHS_CBT_251A", "IHS_CBT_260A", "IHS_CBT_274A",
            "IHS_CBT_289A", "IHS_CBT_297A", "IHS_CBT_299A", "IHS_CBT_300A",
            "IHS_CBT_305A", "IHS_CBT_334A", "IHS_CBT_345A", "IHS_CBT_353A",
            "IHS_CBT_355A", "IHS_CBT_356A", "IHS_CBT_373A",
        ],
    ),
    (
        "JAULA",
        &[
            "IHS_CBT_080M", "IHS_CBT_087M", "IHS_CBT_089M", "IHS_CBT_090M",
            "IHS_CBT_093M", "IHS_CBT_098M", "IHS_CBT_099M", "IHS_CBT_103M",
            "IHS_CBT_111M", "IHS_CBT_112M", "IHS_CBT_113M", "IHS_CBT_114M",
            "IHS_CBT_115M", "IHS_CBT_116M", "IHS_CBT_120M", "IHS_CBT_217M",
            "IHS_CBT_220A", "IHS_CBT_228A", "IHS_CBT_229A", "IHS_CBT_235M",
            "IHS_CBT_241A", "IHS_CBT_249A", "IHS_CBT_263A", "IHS_CBT_266A",
            "IHS_CBT_269A", "IHS_CBT_276A", "IHS_CBT_285A", "IHS_CBT_296A",
            "IHS_CBT_333A", "IHS_CBT_351A", "IHS_CBT_354A", "IHS_CBT_381A",
            "IHS_CBT_383A", "IHS_CBT_384A", "IHS_CBT_386A", "IHS_CBT_393A",
        ],
    ),
    (
        "ISAAC",
        &[
            "IHS_CBT_042M", "IHS_CBT_043M", "IHS_CBT_044M", "IHS_CBT_047M",
            "IHS_CBT_048M", "IHS_CBT_049M", "IHS_CBT_050M", "IHS_CBT_052M",
            "IHS_CBT_054M", "IHS_CBT_057M", "IHS_CBT_058M", "IHS_CBT_062M",
            "IHS_CBT_064M", "IHS_CBT_065M", "IHS_CBT_068M", "IHS_CBT_069M",
            "IHS_CBT_076M", "IHS_CBT_137M", "IHS_CBT_161M", "IHS_CBT_172M",
            "IHS_CBT_179M", "IHS_CBT_193M", "IHS_CBT_201A", "IHS_CBT_210A",
            "IHS_CBT_210M", "IHS_CBT_211A", "IHS_CBT_227M", "IHS_CBT_230A",
            "IHS_CBT_233M", "IHS_CBT_254A", "IHS_CBT_265A", "IHS_CBT_277A",
            "IHS_CBT_278A", "IHS_CBT_307A", "IHS_CBT_312A", "IHS_CBT_314A",
            "IHS_CBT_339A", "IHS_CBT_343A", "IHS_CBT_367A", "IHS_CBT_369A",
            "IHS_CBT_377A",
        ],
    ),
    (
        "JUSTIN",
        &[
            "IHS_CBT_040M", "IHS_CBT_045M", "IHS_CBT_056M", "IHS_CBT_060M",
            "IHS_CBT_070M", "IHS_CBT_085M", "IHS_CBT_091M", "IHS_CBT_148M",
            "IHS_CBT_227A", "IHS_CBT_234A", "IHS_CBT_235A", "IHS_CBT_236A",
            "IHS_CBT_306A", "IHS_CBT_309A", "IHS_CBT_320A", "IHS_CBT_326A",
            "IHS_CBT_346A",
        ],
    ),
    (
        "SAMUEL",
        &[
            "IHS_CBT_078M", "IHS_CBT_079M", "IHS_CBT_084M", "IHS_CBT_107M",
            "IHS_CBT_117M", "IHS_CBT_118M", "IHS_CBT_119M", "IHS_CBT_121M",
            "IHS_CBT_126M", "IHS_CBT_127M", "IHS_CBT_129M", "IHS_CBT_132M",
            "IHS_CBT_133M", "IHS_CBT_134M", "IHS_CBT_146M", "IHS_CBT_167M",
            "IHS_CBT_206A", "IHS_CBT_225M", "IHS_CBT_238M", "IHS_CBT_239A",
            "IHS_CBT_241M", "IHS_CBT_242A", "IHS_CBT_243A", "IHS_CBT_250A",
            "IHS_CBT_259A", "IHS_CBT_261A", "IHS_CBT_267A", "IHS_CBT_301A",
            "IHS_CBT_310A", "IHS_CBT_342A", "IHS_CBT_352A", "IHS_CBT_368A",
            "IHS_CBT_370A", "IHS_CBT_371A", "IHS_CBT_375A", "IHS_CBT_380A",
        ],
    ),
    (
        "SUNDAY",
        &[
            "IHS_CBT_181M", "IHS_CBT_215M", "IHS_CBT_271M", "IHS_CBT_279A",
            "IHS_CBT_319A",
        ],
    ),
    (
        "DAVID",
        &[
            "IHS_CBT_155M", "IHS_CBT_203M", "IHS_CBT_213M", "IHS_CBT_223A",
            "IHS_CBT_328A", "IHS_CBT_329A",
        ],
    ),
    (
        "KENNEDY",
        &[
            "IHS_CBT_018M",
        ],
    ),
    (
        "DALITSO",
        &[
            "IHS_CBT_162M",
        ],
    ),
    ("PATRON", &[]),
];

/// Built-in roster in declaration order
pub fn default_roster() -> Vec<TechnicianAssignment> {
    ROSTER
        .iter()
        .map(|(technician, sites)| TechnicianAssignment {
            technician: technician.to_string(),
            sites: sites.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}
