/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: no other inline parsing happens inside them.
pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: &'static str = "`";
}
