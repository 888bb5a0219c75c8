// Calculation request payload, the shape the dashboard sends after
// parsing an NF-e XML upstream.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::modules::reference::models::OperationType;

use super::line_item::LineItem;

/// POST /notas/calcular request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// NF-e access key (44 digits), echoed back when present
    pub chave_acesso: Option<String>,

    pub numero_nf: Option<String>,

    /// Issuer state (UF)
    pub uf_origem: String,

    /// Recipient state (UF)
    pub uf_destino: String,

    /// Defaults to VENDA_PRODUTO when omitted; the default is applied
    /// here, before reference data resolution, never inside the
    /// calculator
    #[serde(default)]
    pub tipo_operacao: Option<OperationType>,

    pub itens: Vec<LineItemRequest>,
}

impl CalculationRequest {
    pub fn operation_type(&self) -> OperationType {
        self.tipo_operacao.unwrap_or_default()
    }
}

/// One invoice item in the calculation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemRequest {
    pub numero_item: u32,
    pub codigo_produto: String,
    pub descricao: String,
    pub ncm: String,
    pub quantidade: Decimal,
    pub valor_unitario: Decimal,

    /// Taxable base value of the item
    pub valor_produto: Decimal,
}

impl LineItemRequest {
    /// Validate and convert into the domain line item
    pub fn into_line_item(self) -> Result<LineItem> {
        LineItem::new(
            self.numero_item,
            self.codigo_produto,
            self.descricao,
            self.ncm,
            self.quantidade,
            self.valor_unitario,
            self.valor_produto,
        )
    }
}
