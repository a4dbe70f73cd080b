pub struct DefaultsConfig {
    pub output_log: &'static str,
    pub mullpop: &'static str,
    pub charges: &'static str,
    pub spin_output: &'static str,
    pub charge_output: &'static str,
    pub summary_output: &'static str,
    pub relative_to_lowest: bool,
    pub energy_output: &'static str,
    pub orca_input: &'static str,
    pub orca_output: &'static str,
    pub neb_input: &'static str,
    pub neb_coordinates: &'static [&'static str],
    pub neb_images: usize,
    pub neb_output: &'static str,
    pub neb_path_output: &'static str,
    pub gbsa_pattern_suffix: &'static str,
    pub gbsa_ligand_resid: i64,
    pub gbsa_top_hits: usize,
    pub gbsa_output_dir: &'static str,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_log: "qmscript.out",
            mullpop: "scr/mullpop",
            charges: "scr/charge_mull.xls",
            spin_output: "scr/scan_spin",
            charge_output: "scr/scan_charge",
            summary_output: "scan_summary.csv",
            relative_to_lowest: false,
            energy_output: "energies.csv",
            orca_input: "orca.out",
            orca_output: "energy_scan.csv",
            neb_input: "optim.xyz",
            neb_coordinates: &["123,128", "128,138"],
            neb_images: 20,
            neb_output: "neb_frames.csv",
            neb_path_output: "neb_path.xyz",
            gbsa_pattern_suffix: "24.dat",
            gbsa_ligand_resid: 247,
            gbsa_top_hits: 10,
            gbsa_output_dir: ".",
        }
    }
}
