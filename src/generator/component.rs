use super::fragment;
use super::script::{condition_expression, escape_js, identifier, prop_or, property_key};
use super::writer::SourceWriter;
use crate::error::FragmentError;
use crate::form::{ComponentNode, FieldKind};
use serde_json::Value;
use std::collections::BTreeSet;

const PHONE_NUMBER_INPUT: &str = r##"// Phone number input with formatting and validation
function PhoneNumberInput({ value, onChange, placeholder, format }) {
  const [isValid, setIsValid] = useState(true)

  const formatPhoneNumber = (input) => {
    const digits = input.replace(/\D/g, "")
    let formatted = format
    for (let i = 0; i < digits.length && i < format.replace(/[^#]/g, "").length; i++) {
      formatted = formatted.replace("#", digits[i])
    }
    return formatted.replace(/#/g, "")
  }

  const validatePhoneNumber = (value) => {
    if (!value) return true;
    const digits = value.replace(/\D/g, "");
    if (digits.length < 7 || digits.length > 15) return false;
    return /^[\d\s()+\-]+$/.test(value);
  }

  const handleChange = (e) => {
    const formatted = formatPhoneNumber(e.target.value)
    onChange(formatted)
    setIsValid(validatePhoneNumber(formatted))
  }

  return (
    <Input
      type="tel"
      placeholder={placeholder}
      value={value}
      onChange={handleChange}
      className={!isValid ? "border-red-500" : ""}
    />
  )
}"##;

const CURRENCY_INPUT: &str = r#"// Currency input component
function CurrencyInput({ value, onChange, placeholder, currency }) {
  const formatCurrency = (input) => {
    const cleaned = input.replace(/[^\d.]/g, "")
    const parts = cleaned.split(".")
    if (parts.length > 2) {
      return parts[0] + "." + parts.slice(1).join("")
    }
    return cleaned
  }

  const handleChange = (e) => {
    onChange(formatCurrency(e.target.value))
  }

  const currencySymbol =
    currency === "USD" ? "$" :
    currency === "EUR" ? "€" :
    currency === "GBP" ? "£" :
    currency

  return (
    <div className="relative">
      <span className="absolute left-3 top-1/2 -translate-y-1/2 text-muted-foreground">
        {currencySymbol}
      </span>
      <Input
        type="text"
        placeholder={placeholder}
        value={value}
        onChange={handleChange}
        className="pl-8"
      />
    </div>
  )
}"#;

/// Emits the React component module for `forest`.
pub(super) fn emit_component(
    forest: &[ComponentNode],
    fields: &[&ComponentNode],
    form_name: &str,
    indent_width: usize,
    warnings: &mut Vec<FragmentError>,
) -> String {
    let kinds = kinds_present(forest);
    let has = |kind: FieldKind| kinds.contains(&kind);
    let mut w = SourceWriter::new(indent_width);

    w.line(0, "\"use client\"");
    w.blank();
    w.line(0, "import { zodResolver } from \"@hookform/resolvers/zod\"");
    w.line(0, "import { useForm } from \"react-hook-form\"");
    w.blank();
    w.line(0, "import { Button } from \"@/components/ui/button\"");
    w.block(
        0,
        "import {\n  Form,\n  FormControl,\n  FormDescription,\n  FormField,\n  FormItem,\n  FormLabel,\n  FormMessage,\n} from \"@/components/ui/form\"",
    );
    for import in imports(&has) {
        w.line(0, import);
    }
    w.blank();
    w.line(
        0,
        format!(
            "import {{ {name}Schema, {name}Type }} from \"./schema\"",
            name = form_name
        ),
    );
    w.blank();

    if has(FieldKind::PhoneNumber) {
        w.block(0, PHONE_NUMBER_INPUT);
        w.blank();
    }
    if has(FieldKind::Currency) {
        w.block(0, CURRENCY_INPUT);
        w.blank();
    }

    w.line(0, format!("export function {}() {{", form_name));
    w.line(1, format!("const form = useForm<{}Type>({{", form_name));
    w.line(2, format!("resolver: zodResolver({}Schema),", form_name));
    w.line(2, "defaultValues: {");
    for field in fields {
        w.line(
            3,
            format!("{}: {},", property_key(&field.name), default_value(field.kind)),
        );
    }
    w.line(2, "},");
    w.line(1, "})");
    w.blank();
    w.line(1, format!("function onSubmit(values: {}Type) {{", form_name));
    w.line(2, "console.log(values)");
    w.line(1, "}");
    w.blank();
    w.line(1, "return (");
    w.line(2, "<Form {...form}>");
    w.line(
        3,
        "<form onSubmit={form.handleSubmit(onSubmit)} className=\"space-y-8\">",
    );

    let mut renderer = Renderer {
        w: &mut w,
        warnings,
    };
    renderer.nodes(forest, 4);

    w.line(4, "<Button type=\"submit\">Submit</Button>");
    w.line(3, "</form>");
    w.line(2, "</Form>");
    w.line(1, ")");
    w.line(0, "}");
    w.finish()
}

/// Kinds reachable through layout containers. Children of dynamic lists are not rendered.
fn kinds_present(forest: &[ComponentNode]) -> BTreeSet<FieldKind> {
    let mut kinds = BTreeSet::new();
    let mut stack: Vec<&ComponentNode> = forest.iter().collect();
    while let Some(node) = stack.pop() {
        kinds.insert(node.kind);
        if node.kind.is_layout() {
            stack.extend(node.children());
        }
    }
    kinds
}

fn imports(has: &impl Fn(FieldKind) -> bool) -> Vec<&'static str> {
    let mut out = Vec::new();
    let any = |kinds: &[FieldKind]| kinds.iter().any(|k| has(*k));

    if any(&[
        FieldKind::Text,
        FieldKind::Email,
        FieldKind::Password,
        FieldKind::Tel,
        FieldKind::Number,
        FieldKind::Url,
        FieldKind::PhoneNumber,
        FieldKind::Currency,
    ]) {
        out.push("import { Input } from \"@/components/ui/input\"");
    }
    if has(FieldKind::Textarea) {
        out.push("import { Textarea } from \"@/components/ui/textarea\"");
    }
    if has(FieldKind::Select) {
        out.push("import { Select, SelectContent, SelectItem, SelectTrigger, SelectValue } from \"@/components/ui/select\"");
    }
    if has(FieldKind::Checkbox) {
        out.push("import { Checkbox } from \"@/components/ui/checkbox\"");
    }
    if has(FieldKind::Switch) {
        out.push("import { Switch } from \"@/components/ui/switch\"");
    }
    if has(FieldKind::Radio) {
        out.push("import { RadioGroup, RadioGroupItem } from \"@/components/ui/radio-group\"");
    }
    if has(FieldKind::Date) {
        out.push("import { Calendar } from \"@/components/ui/calendar\"");
        out.push("import { Popover, PopoverContent, PopoverTrigger } from \"@/components/ui/popover\"");
        out.push("import { CalendarIcon } from \"lucide-react\"");
        out.push("import { format } from \"date-fns\"");
    }
    if has(FieldKind::Section) {
        out.push("import { Card, CardContent, CardDescription, CardHeader, CardTitle } from \"@/components/ui/card\"");
    }
    if any(&[FieldKind::Checkbox, FieldKind::Radio]) {
        out.push("import { Label } from \"@/components/ui/label\"");
    }
    if has(FieldKind::RichText) {
        out.push("import { RichTextEditor } from \"./rich-text-editor\"");
    }
    if has(FieldKind::Signature) {
        out.push("import { SignaturePad } from \"./signature-pad\"");
    }
    if has(FieldKind::PhoneNumber) {
        out.push("import { useState } from \"react\"");
    }
    out
}

fn default_value(kind: FieldKind) -> &'static str {
    match kind {
        kind if kind.is_boolean() => "false",
        FieldKind::Number | FieldKind::Date => "undefined",
        FieldKind::DynamicList => "[]",
        _ => "\"\"",
    }
}

/// Text placed between JSX tags. Anything JSX would interpret is wrapped in a string expression.
fn jsx_text(text: &str) -> String {
    if text.contains(['{', '}', '<', '>']) {
        format!("{{\"{}\"}}", escape_js(text))
    } else {
        text.to_string()
    }
}

/// A `name="value"` attribute, or `name={"value"}` when the value contains a quote.
fn jsx_attr(name: &str, value: &str) -> String {
    if value.contains('"') {
        format!("{}={{\"{}\"}}", name, escape_js(value))
    } else {
        format!("{}=\"{}\"", name, value)
    }
}

/// `{ label, value }` pairs of a select or radio field.
fn options(field: &ComponentNode) -> Vec<(String, String)> {
    field
        .prop("options")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    let text = |key: &str| {
                        item.get(key)
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string()
                    };
                    (text("label"), text("value"))
                })
                .collect()
        })
        .unwrap_or_default()
}

struct Renderer<'w> {
    w: &'w mut SourceWriter,
    warnings: &'w mut Vec<FragmentError>,
}

impl Renderer<'_> {
    fn nodes(&mut self, nodes: &[ComponentNode], level: usize) {
        for node in nodes {
            if node.conditions.is_empty() {
                self.node(node, level);
                continue;
            }
            self.w.line(level, "{(() => {");
            self.w.line(
                level + 1,
                format!(
                    "const isVisible = {};",
                    condition_expression(&node.conditions)
                ),
            );
            self.w.line(level + 1, "if (!isVisible) return null;");
            self.w.line(level + 1, "return (");
            self.node(node, level + 2);
            self.w.line(level + 1, ");");
            self.w.line(level, "})()}");
        }
    }

    fn node(&mut self, node: &ComponentNode, level: usize) {
        match node.kind {
            FieldKind::Grid => self.container(
                node,
                level,
                format!(
                    "<div className=\"grid grid-cols-{} gap-{}\">",
                    prop_or(node, "columns", "2"),
                    prop_or(node, "gap", "4")
                ),
            ),
            FieldKind::Flex => {
                let direction = if node.prop_str("direction") == Some("column") {
                    "flex-col"
                } else {
                    "flex-row"
                };
                let wrap = if node.prop_bool("wrap") {
                    "flex-wrap"
                } else {
                    "flex-nowrap"
                };
                self.container(
                    node,
                    level,
                    format!(
                        "<div className=\"flex {} {} gap-{} justify-{} items-{}\">",
                        direction,
                        wrap,
                        prop_or(node, "gap", "4"),
                        prop_or(node, "justify", "between"),
                        prop_or(node, "align", "center")
                    ),
                )
            }
            FieldKind::Row => self.container(
                node,
                level,
                format!(
                    "<div className=\"flex flex-row gap-{}\">",
                    prop_or(node, "gap", "4")
                ),
            ),
            FieldKind::Column => self.container(
                node,
                level,
                format!(
                    "<div className=\"flex flex-col gap-{}\">",
                    prop_or(node, "gap", "4")
                ),
            ),
            FieldKind::Section => self.section(node, level),
            _ => self.field(node, level),
        }
    }

    fn container(&mut self, node: &ComponentNode, level: usize, open: String) {
        self.w.line(level, open);
        self.nodes(node.children(), level + 1);
        self.w.line(level, "</div>");
    }

    fn section(&mut self, node: &ComponentNode, level: usize) {
        self.w.line(level, "<Card>");
        self.w.line(level + 1, "<CardHeader>");
        self.w.line(
            level + 2,
            format!(
                "<CardTitle>{}</CardTitle>",
                jsx_text(&prop_or(node, "title", "Section Title"))
            ),
        );
        if let Some(description) = node.prop_str("description").filter(|d| !d.is_empty()) {
            self.w.line(
                level + 2,
                format!("<CardDescription>{}</CardDescription>", jsx_text(description)),
            );
        }
        self.w.line(level + 1, "</CardHeader>");
        self.w.line(level + 1, "<CardContent>");
        self.nodes(node.children(), level + 2);
        self.w.line(level + 1, "</CardContent>");
        self.w.line(level, "</Card>");
    }

    fn field(&mut self, field: &ComponentNode, level: usize) {
        let extra = match fragment::custom_props(field) {
            Ok(attrs) => attrs,
            Err(e) => {
                log::warn!("Skipping custom props: {}", e);
                self.warnings.push(e);
                String::new()
            }
        };

        self.w.line(level, "<FormField");
        self.w.line(level + 1, "control={form.control}");
        self.w.line(level + 1, jsx_attr("name", &field.name));
        self.w.line(level + 1, "render={({ field }) => (");
        self.w.block(level + 2, &field_body(field, &extra));
        self.w.line(level + 1, ")}");
        self.w.line(level, "/>");
    }
}

/// The `<FormItem>` markup for one field, authored with two-space indentation.
fn field_body(field: &ComponentNode, extra: &str) -> String {
    let label = jsx_text(field.label());
    let placeholder = jsx_attr("placeholder", &prop_or(field, "placeholder", ""));
    let mut lines: Vec<String> = Vec::new();
    // Custom attributes sit on their own line inside multi-line tags.
    let extra_line = |indent: &str| -> Option<String> {
        (!extra.is_empty()).then(|| format!("{}{}", indent, extra))
    };
    let inline = |parts: &[&str]| -> String {
        parts
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    };

    match field.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Password | FieldKind::Tel | FieldKind::Url => {
            let input_type = format!("type=\"{}\"", field.kind.wire_name());
            lines.push("<FormItem>".into());
            lines.push(format!("  <FormLabel>{}</FormLabel>", label));
            lines.push("  <FormControl>".into());
            lines.push(format!(
                "    {} />",
                inline(&["<Input", input_type.as_str(), placeholder.as_str(), extra, "{...field}"])
            ));
            lines.push("  </FormControl>".into());
            lines.push("  <FormMessage />".into());
            lines.push("</FormItem>".into());
        }
        FieldKind::PhoneNumber => {
            let format = prop_or(field, "format", "(###) ###-####");
            lines.push("<FormItem>".into());
            lines.push(format!("  <FormLabel>{}</FormLabel>", label));
            lines.push("  <FormControl>".into());
            lines.push("    <PhoneNumberInput".into());
            lines.push(format!("      {}", placeholder));
            lines.push(format!("      {}", jsx_attr("format", &format)));
            lines.push("      value={field.value}".into());
            lines.push("      onChange={field.onChange}".into());
            lines.extend(extra_line("      "));
            lines.push("    />".into());
            lines.push("  </FormControl>".into());
            lines.push(format!(
                "  <FormDescription>Format: {}</FormDescription>",
                jsx_text(&format)
            ));
            lines.push("  <FormMessage />".into());
            lines.push("</FormItem>".into());
        }
        FieldKind::Currency => {
            lines.push("<FormItem>".into());
            lines.push(format!("  <FormLabel>{}</FormLabel>", label));
            lines.push("  <FormControl>".into());
            lines.push("    <CurrencyInput".into());
            lines.push(format!("      {}", placeholder));
            lines.push(format!(
                "      {}",
                jsx_attr("currency", &prop_or(field, "currency", "USD"))
            ));
            lines.push("      value={field.value}".into());
            lines.push("      onChange={field.onChange}".into());
            lines.extend(extra_line("      "));
            lines.push("    />".into());
            lines.push("  </FormControl>".into());
            lines.push("  <FormMessage />".into());
            lines.push("</FormItem>".into());
        }
        FieldKind::Number => {
            lines.push("<FormItem>".into());
            lines.push(format!("  <FormLabel>{}</FormLabel>", label));
            lines.push("  <FormControl>".into());
            lines.push("    <Input".into());
            lines.push("      type=\"number\"".into());
            lines.push(format!("      {}", placeholder));
            lines.extend(extra_line("      "));
            lines.push("      {...field}".into());
            lines.push("      onChange={(e) => field.onChange(e.target.value === \"\" ? undefined : Number(e.target.value))}".into());
            lines.push("    />".into());
            lines.push("  </FormControl>".into());
            lines.push("  <FormMessage />".into());
            lines.push("</FormItem>".into());
        }
        FieldKind::Textarea => {
            let rows = format!("rows={{{}}}", prop_or(field, "rows", "4"));
            lines.push("<FormItem>".into());
            lines.push(format!("  <FormLabel>{}</FormLabel>", label));
            lines.push("  <FormControl>".into());
            lines.push(format!(
                "    {} />",
                inline(&["<Textarea", placeholder.as_str(), rows.as_str(), extra, "{...field}"])
            ));
            lines.push("  </FormControl>".into());
            lines.push("  <FormMessage />".into());
            lines.push("</FormItem>".into());
        }
        FieldKind::Select => {
            lines.push("<FormItem>".into());
            lines.push(format!("  <FormLabel>{}</FormLabel>", label));
            lines.push("  <Select onValueChange={field.onChange} defaultValue={field.value}>".into());
            lines.push("    <FormControl>".into());
            lines.push(format!("      {}>", inline(&["<SelectTrigger", extra])));
            lines.push(format!("        <SelectValue {} />", placeholder));
            lines.push("      </SelectTrigger>".into());
            lines.push("    </FormControl>".into());
            lines.push("    <SelectContent>".into());
            for (text, value) in options(field) {
                lines.push(format!(
                    "      <SelectItem {}>{}</SelectItem>",
                    jsx_attr("value", &value),
                    jsx_text(&text)
                ));
            }
            lines.push("    </SelectContent>".into());
            lines.push("  </Select>".into());
            lines.push("  <FormMessage />".into());
            lines.push("</FormItem>".into());
        }
        FieldKind::Checkbox => {
            lines.push("<FormItem className=\"flex flex-row items-start space-x-3 space-y-0 rounded-md p-4\">".into());
            lines.push("  <FormControl>".into());
            lines.push("    <Checkbox".into());
            lines.push("      checked={field.value}".into());
            lines.push("      onCheckedChange={field.onChange}".into());
            lines.extend(extra_line("      "));
            lines.push("    />".into());
            lines.push("  </FormControl>".into());
            lines.push("  <div className=\"space-y-1 leading-none\">".into());
            lines.push(format!("    <FormLabel>{}</FormLabel>", label));
            lines.push("    <FormMessage />".into());
            lines.push("  </div>".into());
            lines.push("</FormItem>".into());
        }
        FieldKind::Switch => {
            lines.push("<FormItem className=\"flex flex-row items-center justify-between rounded-md p-4\">".into());
            lines.push("  <div className=\"space-y-0.5\">".into());
            lines.push(format!("    <FormLabel>{}</FormLabel>", label));
            lines.push("  </div>".into());
            lines.push("  <FormControl>".into());
            lines.push("    <Switch".into());
            lines.push("      checked={field.value}".into());
            lines.push("      onCheckedChange={field.onChange}".into());
            lines.extend(extra_line("      "));
            lines.push("    />".into());
            lines.push("  </FormControl>".into());
            lines.push("  <FormMessage />".into());
            lines.push("</FormItem>".into());
        }
        FieldKind::Radio => {
            let name = identifier(&field.name);
            lines.push("<FormItem className=\"space-y-3\">".into());
            lines.push(format!("  <FormLabel>{}</FormLabel>", label));
            lines.push("  <FormControl>".into());
            lines.push("    <RadioGroup".into());
            lines.push("      onValueChange={field.onChange}".into());
            lines.push("      defaultValue={field.value}".into());
            lines.push("      className=\"flex flex-col space-y-1\"".into());
            lines.extend(extra_line("      "));
            lines.push("    >".into());
            for (text, value) in options(field) {
                let id = format!("{}-{}", name, value);
                lines.push("      <div className=\"flex items-center space-x-2\">".into());
                lines.push(format!(
                    "        <RadioGroupItem {} {} />",
                    jsx_attr("value", &value),
                    jsx_attr("id", &id)
                ));
                lines.push(format!(
                    "        <Label {}>{}</Label>",
                    jsx_attr("htmlFor", &id),
                    jsx_text(&text)
                ));
                lines.push("      </div>".into());
            }
            lines.push("    </RadioGroup>".into());
            lines.push("  </FormControl>".into());
            lines.push("  <FormMessage />".into());
            lines.push("</FormItem>".into());
        }
        FieldKind::Date => {
            lines.push("<FormItem className=\"flex flex-col\">".into());
            lines.push(format!("  <FormLabel>{}</FormLabel>", label));
            lines.push("  <Popover>".into());
            lines.push("    <PopoverTrigger asChild>".into());
            lines.push("      <FormControl>".into());
            lines.push("        <Button".into());
            lines.push("          variant={\"outline\"}".into());
            lines.push("          className={`w-full pl-3 text-left font-normal ${!field.value ? \"text-muted-foreground\" : \"\"}`}".into());
            lines.extend(extra_line("          "));
            lines.push("        >".into());
            lines.push("          {field.value ? (".into());
            lines.push("            format(field.value, \"PPP\")".into());
            lines.push("          ) : (".into());
            lines.push("            <span>Pick a date</span>".into());
            lines.push("          )}".into());
            lines.push("          <CalendarIcon className=\"ml-auto h-4 w-4 opacity-50\" />".into());
            lines.push("        </Button>".into());
            lines.push("      </FormControl>".into());
            lines.push("    </PopoverTrigger>".into());
            lines.push("    <PopoverContent className=\"w-auto p-0\" align=\"start\">".into());
            lines.push("      <Calendar".into());
            lines.push("        mode=\"single\"".into());
            lines.push("        selected={field.value}".into());
            lines.push("        onSelect={field.onChange}".into());
            lines.push("        initialFocus".into());
            lines.push("      />".into());
            lines.push("    </PopoverContent>".into());
            lines.push("  </Popover>".into());
            lines.push("  <FormMessage />".into());
            lines.push("</FormItem>".into());
        }
        FieldKind::RichText => {
            lines.push("<FormItem>".into());
            lines.push(format!("  <FormLabel>{}</FormLabel>", label));
            lines.push("  <FormControl>".into());
            lines.push("    <RichTextEditor".into());
            lines.push("      value={field.value}".into());
            lines.push("      onChange={field.onChange}".into());
            lines.push(format!("      {}", placeholder));
            lines.extend(extra_line("      "));
            lines.push("    />".into());
            lines.push("  </FormControl>".into());
            lines.push("  <FormMessage />".into());
            lines.push("</FormItem>".into());
        }
        FieldKind::Signature => {
            lines.push("<FormItem>".into());
            lines.push(format!("  <FormLabel>{}</FormLabel>", label));
            lines.push("  <FormControl>".into());
            lines.push("    <SignaturePad".into());
            lines.push("      value={field.value}".into());
            lines.push("      onChange={field.onChange}".into());
            lines.push(format!("      width={{{}}}", prop_or(field, "width", "400")));
            lines.push(format!("      height={{{}}}", prop_or(field, "height", "200")));
            lines.extend(extra_line("      "));
            lines.push("    />".into());
            lines.push("  </FormControl>".into());
            lines.push("  <FormMessage />".into());
            lines.push("</FormItem>".into());
        }
        // Dynamic lists get a labelled slot; item editing is left to the host application.
        FieldKind::DynamicList
        | FieldKind::Grid
        | FieldKind::Flex
        | FieldKind::Row
        | FieldKind::Column
        | FieldKind::Section => {
            lines.push("<FormItem>".into());
            lines.push(format!("  <FormLabel>{}</FormLabel>", label));
            lines.push("  <FormControl>".into());
            lines.push("    <div />".into());
            lines.push("  </FormControl>".into());
            lines.push("  <FormMessage />".into());
            lines.push("</FormItem>".into());
        }
    }

    lines.join("\n")
}
