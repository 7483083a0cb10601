use gazete_domain::settings::ThemeSettings;
use gazete_domain::theme::ResolvedTheme;
use indexmap::IndexMap;
use std::fmt;

/// HSL三元组：H为整数角度，S/L为整数百分比
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% {}%", self.h, self.s, self.l)
    }
}

/// 6位hex颜色转HSL
///
/// 非法输入（长度、字符）不产生转换，调用方只保留原始hex。
pub fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&digits[0..2], 16).ok()? as f64 / 255.0;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()? as f64 / 255.0;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()? as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let hue = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (hue / 6.0, s)
    };

    Some(Hsl {
        h: (h * 360.0).round() as u16,
        s: (s * 100.0).round() as u8,
        l: (l * 100.0).round() as u8,
    })
}

/// 按解析出的模式推导CSS自定义属性表
///
/// 主/次/强调色原样写入，主色额外生成HSL伴生变量；再叠加
/// 字体、基准字号和当前模式的子调色板。插入顺序稳定。
pub fn css_variables(settings: &ThemeSettings, resolved: ResolvedTheme) -> IndexMap<String, String> {
    let mut vars = IndexMap::new();

    if let Some(ref primary) = settings.primary_color {
        vars.insert("--color-primary".to_string(), primary.clone());
        if let Some(hsl) = hex_to_hsl(primary) {
            vars.insert("--color-primary-hsl".to_string(), hsl.to_string());
        }
    }
    if let Some(ref secondary) = settings.secondary_color {
        vars.insert("--color-secondary".to_string(), secondary.clone());
    }
    if let Some(ref accent) = settings.accent_color {
        vars.insert("--color-accent".to_string(), accent.clone());
    }

    if let Some(ref heading) = settings.heading_font {
        vars.insert(
            "--font-heading".to_string(),
            format!("'{}', Georgia, serif", heading),
        );
    }
    if let Some(ref body) = settings.body_font {
        vars.insert(
            "--font-body".to_string(),
            format!("'{}', system-ui, sans-serif", body),
        );
    }
    if let Some(size) = settings.base_font_size {
        vars.insert("--font-size-base".to_string(), format!("{}px", size));
    }

    let palette = match resolved {
        ResolvedTheme::Dark => settings.dark_mode.as_ref(),
        ResolvedTheme::Light => settings.light_mode.as_ref(),
    };
    if let Some(palette) = palette {
        if let Some(ref background) = palette.background {
            vars.insert("--color-background".to_string(), background.clone());
        }
        if let Some(ref surface) = palette.surface {
            vars.insert("--color-surface".to_string(), surface.clone());
        }
        if let Some(ref text_primary) = palette.text_primary {
            vars.insert("--color-text-primary".to_string(), text_primary.clone());
        }
        if let Some(ref text_secondary) = palette.text_secondary {
            vars.insert("--color-text-secondary".to_string(), text_secondary.clone());
        }
        if let Some(ref border) = palette.border {
            vars.insert("--color-border".to_string(), border.clone());
        }
    }

    vars
}

/// 渲染为内联的:root样式块
pub fn css_block(vars: &IndexMap<String, String>) -> String {
    let mut out = String::with_capacity(vars.len() * 32 + 16);
    out.push_str(":root{");
    for (name, value) in vars {
        out.push_str(name);
        out.push(':');
        out.push_str(value);
        out.push(';');
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazete_domain::settings::ModePalette;

    #[test]
    fn test_hex_to_hsl_known_values() {
        assert_eq!(hex_to_hsl("#dc2626").unwrap().to_string(), "0 72% 51%");
        assert_eq!(hex_to_hsl("#000000").unwrap().to_string(), "0 0% 0%");
        assert_eq!(hex_to_hsl("#ffffff").unwrap().to_string(), "0 0% 100%");
        assert_eq!(hex_to_hsl("00ff00").unwrap().to_string(), "120 100% 50%");
    }

    #[test]
    fn test_hex_to_hsl_rejects_malformed() {
        assert!(hex_to_hsl("red").is_none());
        assert!(hex_to_hsl("#abc").is_none());
        assert!(hex_to_hsl("#gggggg").is_none());
        assert!(hex_to_hsl("").is_none());
    }

    fn settings() -> ThemeSettings {
        ThemeSettings {
            primary_color: Some("#dc2626".to_string()),
            secondary_color: Some("#1f2937".to_string()),
            heading_font: Some("Merriweather".to_string()),
            base_font_size: Some(16),
            light_mode: Some(ModePalette {
                background: Some("#ffffff".to_string()),
                ..Default::default()
            }),
            dark_mode: Some(ModePalette {
                background: Some("#111827".to_string()),
                border: Some("#374151".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_css_variables_primary_with_hsl_companion() {
        let vars = css_variables(&settings(), ResolvedTheme::Light);
        assert_eq!(vars.get("--color-primary").unwrap(), "#dc2626");
        assert_eq!(vars.get("--color-primary-hsl").unwrap(), "0 72% 51%");
        assert_eq!(
            vars.get("--font-heading").unwrap(),
            "'Merriweather', Georgia, serif"
        );
        assert_eq!(vars.get("--font-size-base").unwrap(), "16px");
        assert_eq!(vars.get("--color-background").unwrap(), "#ffffff");
    }

    #[test]
    fn test_css_variables_mode_palette_switches() {
        let vars = css_variables(&settings(), ResolvedTheme::Dark);
        assert_eq!(vars.get("--color-background").unwrap(), "#111827");
        assert_eq!(vars.get("--color-border").unwrap(), "#374151");
    }

    #[test]
    fn test_malformed_primary_skips_hsl_variable() {
        let mut settings = settings();
        settings.primary_color = Some("kirmizi".to_string());
        let vars = css_variables(&settings, ResolvedTheme::Light);
        assert_eq!(vars.get("--color-primary").unwrap(), "kirmizi");
        assert!(vars.get("--color-primary-hsl").is_none());
    }

    #[test]
    fn test_css_block_renders_in_order() {
        let mut vars = IndexMap::new();
        vars.insert("--a".to_string(), "1".to_string());
        vars.insert("--b".to_string(), "2".to_string());
        assert_eq!(css_block(&vars), ":root{--a:1;--b:2;}");
    }
}
