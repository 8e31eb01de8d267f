use cyclekit_core::ConversionMode;
use cyclekit_engine::{converter_for, ConverterOptions, Mach3Converter, ProgramConverter};

const PROGRAM: &str = "\
(Arc test)
G21 G90
M3 S7500

G0 Z5
G2 X10 Y0 I5 J0 K0
  g3 x0 y0 i-5 j0 k-1.25
; K0 in a comment stays
G1 X5 Y5 K2
G81 X1 Y1 Z-1 R1 F10
";

#[test]
fn test_mach3_conversion() {
    let report = Mach3Converter::default().convert(PROGRAM).unwrap();
    let lines: Vec<&str> = report.output.lines().collect();

    assert_eq!(lines[1], "; Mach3 Startup Routine");
    assert_eq!(lines[7], "M3 S7500 ; Spindle on at 7500 RPM");
    assert_eq!(
        &lines[11..20],
        &[
            "(Arc test)",
            "G21 G90",
            "M3 S7500",
            "G0 Z5",
            "G2 X10 Y0 I5 J0",
            "g3 x0 y0 i-5 j0",
            "; K0 in a comment stays",
            "G1 X5 Y5 K2",
            "G81 X1 Y1 Z-1 R1 F10",
        ]
    );
    assert!(report.output.contains("G0 Z5.000000 ; Raise Z to safe height"));
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_mode_selection() {
    let converter = converter_for(ConversionMode::Mach3, ConverterOptions::default());
    let report = converter.convert("G2 X1 Y1 I1 J0 K5").unwrap();
    assert!(report.output.contains("\nG2 X1 Y1 I1 J0\n"));

    let converter = converter_for("linear".parse().unwrap(), ConverterOptions::default());
    let report = converter.convert("G81 X1 Y1 Z-1 R1 F10").unwrap();
    assert!(report.output.contains("G1 Z-1.000000 F10.000000"));
}
