//! Batch publishing.
//!
//! Items queue up, then `publishBatch` validates the whole queue
//! (all-or-nothing), splits it into chunks of `batchSize`, publishes the
//! chunks in order with a 100 ms pause between them, and clears the queue.

use super::{FlowContext, FlowStrategy, manager_catch, react_catch, usage_call};
use hypergraph_core::Strategy;

#[derive(Debug)]
pub(super) struct Batch;

/// How a queue of a given length splits into chunks.
///
/// Only the totals are kept: `len() - 1` full chunks of `batch_size`
/// followed by one chunk of [`ChunkPlan::last_chunk`] items.
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::publishing::ChunkPlan;
///
/// let plan = ChunkPlan::new(25, 10);
/// assert_eq!(plan.len(), 3);
/// assert_eq!(plan.full_chunks(), 2);
/// assert_eq!(plan.last_chunk(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    queue_length: usize,
    batch_size: usize,
}

impl ChunkPlan {
    /// Plans `queue_length` items in chunks of `batch_size`.
    ///
    /// A zero batch size is treated as 1.
    #[must_use]
    pub fn new(queue_length: usize, batch_size: usize) -> Self {
        Self {
            queue_length,
            batch_size: batch_size.max(1),
        }
    }

    /// Number of chunks, `⌈queue_length / batch_size⌉`.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.queue_length.div_ceil(self.batch_size)
    }

    /// Returns `true` for an empty queue.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.queue_length == 0
    }

    /// Number of chunks holding exactly `batch_size` items.
    #[must_use]
    pub const fn full_chunks(&self) -> usize {
        self.queue_length / self.batch_size
    }

    /// Size of the final chunk; equals `batch_size` when the queue divides
    /// evenly and 0 for an empty queue.
    #[must_use]
    pub const fn last_chunk(&self) -> usize {
        match self.queue_length % self.batch_size {
            0 if self.queue_length == 0 => 0,
            0 => self.batch_size,
            rest => rest,
        }
    }

    /// Renders the plan as a comment block.
    ///
    /// The block has at most four lines whatever the queue length.
    #[must_use]
    pub fn render(&self) -> String {
        let noun = if self.len() == 1 { "chunk" } else { "chunks" };
        let mut text = format!(
            "\n// Chunk plan: {} queued items at batchSize {} -> {} {noun}\n",
            self.queue_length,
            self.batch_size,
            self.len()
        );
        let full = self.full_chunks();
        if full > 0 {
            text.push_str(&format!("//   {full} x {} items\n", self.batch_size));
        }
        let rest = self.queue_length % self.batch_size;
        if rest > 0 {
            text.push_str(&format!("//   1 x {rest} items (last chunk)\n"));
        }
        text
    }
}

impl FlowStrategy for Batch {
    fn kind(&self) -> Strategy {
        Strategy::Batch
    }

    fn react_components(&self, ctx: &FlowContext) -> Vec<String> {
        vec![format!("{}Form", ctx.entity)]
    }

    fn react_state(&self, _ctx: &FlowContext) -> String {
        "  const [batchQueue, setBatchQueue] = useState([]);\n  const [currentBatch, setCurrentBatch] = useState([]);\n\n".to_string()
    }

    fn react_logic(&self, ctx: &FlowContext) -> String {
        let entity = &ctx.entity;
        let var = &ctx.var;
        let batch_size = ctx.batch_size;
        let validation = if ctx.validated {
            "      // Validate every queued item before publishing any chunk\n      const validationResults = await Promise.all(batchQueue.map(validateData));\n      const invalidItems = validationResults.filter(v => !v.isValid);\n      setValidationResults(validationResults);\n\n      if (invalidItems.length > 0) {\n        throw new Error(`${invalidItems.length} items failed validation`);\n      }\n\n"
        } else {
            ""
        };
        let preview = if ctx.preview {
            "      // Preview the first queued item\n      setPreviewData(await generatePreview(batchQueue[0]));\n\n"
        } else {
            ""
        };
        let deps: Vec<&str> = [
            Some("batchQueue"),
            ctx.validated.then_some("validateData"),
            ctx.preview.then_some("generatePreview"),
        ]
        .into_iter()
        .flatten()
        .collect();

        format!(
            r"  const BATCH_SIZE = {batch_size};

  const addToBatch = useCallback((data) => {{
    setBatchQueue(prev => [...prev, data]);
  }}, []);

  const publishBatch = useCallback(async () => {{
    if (batchQueue.length === 0) return;

    try {{
      setPublishingState(prev => ({{
        ...prev,
        status: 'preparing',
        error: null,
        progress: 0
      }}));

{validation}{preview}      const batches = [];
      for (let i = 0; i < batchQueue.length; i += BATCH_SIZE) {{
        batches.push(batchQueue.slice(i, i + BATCH_SIZE));
      }}

      setPublishingState(prev => ({{ ...prev, status: 'publishing' }}));

      let publishedCount = 0;

      for (let i = 0; i < batches.length; i++) {{
        const batch = batches[i];
        setCurrentBatch(batch);

        // Prepare operations for the batch
        const batchOps = [];
        for (const item of batch) {{
          const ops = preparePublish({entity}, item, mapping);
          batchOps.push(...ops);
        }}

        await publishOps(batchOps);
        publishedCount += batch.length;

        const progress = ((i + 1) / batches.length) * 100;
        setPublishingState(prev => ({{
          ...prev,
          progress,
          publishedCount: prev.publishedCount + batch.length
        }}));

        // Small delay between batches
        await new Promise(resolve => setTimeout(resolve, 100));
      }}

      setPublishingState(prev => ({{ ...prev, status: 'success' }}));
      setBatchQueue([]);
      setCurrentBatch([]);

      console.log(`Published ${{publishedCount}} {var}s successfully!`);
{catch}  }}, [{deps}]);

",
            catch = react_catch("Batch publishing"),
            deps = deps.join(", ")
        )
    }

    fn react_ui(&self, ctx: &FlowContext) -> String {
        format!(
            r#"      <div className="batch-publishing">
        <h3>Batch Publishing</h3>
        <div className="batch-info">
          <p>Queue: {{batchQueue.length}} items</p>
          {{currentBatch.length > 0 && <p>Current chunk: {{currentBatch.length}} items</p>}}
          <button
            onClick={{publishBatch}}
            disabled={{batchQueue.length === 0 || publishingState.status === 'publishing'}}
          >
            Publish Batch
          </button>
        </div>

        <{entity}Form onSubmit={{addToBatch}} submitLabel="Add to Batch" />

        <div className="batch-queue">
          <h4>Queued Items:</h4>
          {{batchQueue.map((item, index) => (
            <div key={{index}} className="batch-item">
              <span>{{item.name || `Item ${{index + 1}}`}}</span>
              <button onClick={{() => setBatchQueue(prev => prev.filter((_, i) => i !== index))}}>
                Remove
              </button>
            </div>
          ))}}
        </div>
      </div>

"#,
            entity = ctx.entity
        )
    }

    fn manager_fields(&self, ctx: &FlowContext) -> String {
        if ctx.typed {
            format!(
                "  private batchQueue: any[] = [];\n  private batchSize: number = {};\n",
                ctx.batch_size
            )
        } else {
            format!(
                "    this.batchQueue = [];\n    this.batchSize = {};\n",
                ctx.batch_size
            )
        }
    }

    fn manager_methods(&self, ctx: &FlowContext) -> String {
        let validation = if ctx.validated {
            "      // Validate every queued item before publishing any chunk\n      const validationResults = await Promise.all(this.batchQueue.map(data => this.validateData(data)));\n      const invalidItems = validationResults.filter(v => !v.isValid);\n\n      if (invalidItems.length > 0) {\n        throw new Error(`${invalidItems.length} items failed validation`);\n      }\n\n"
        } else {
            ""
        };
        let preview = if ctx.preview {
            "      // Preview the first queued item\n      await this.generatePreview(this.batchQueue[0]);\n\n"
        } else {
            ""
        };

        format!(
            r"{add_to_batch}
    this.batchQueue.push(data);
  }}

{queue_length}
    return this.batchQueue.length;
  }}

{clear_batch}
    this.batchQueue = [];
  }}

{publish_batch}
    if (this.batchQueue.length === 0) {{
      throw new Error('Batch queue is empty');
    }}

    try {{
      this.updateState({{ status: 'preparing', error: null, progress: 0 }});

{validation}{preview}      // Process in chunks
      const batches{batches_type} = [];
      for (let i = 0; i < this.batchQueue.length; i += this.batchSize) {{
        batches.push(this.batchQueue.slice(i, i + this.batchSize));
      }}

      this.updateState({{ status: 'publishing' }});

      for (let i = 0; i < batches.length; i++) {{
        const batch = batches[i];
        const batchOps{ops_type} = [];

        for (const item of batch) {{
          const ops = preparePublish({entity}, item, mapping);
          batchOps.push(...ops);
        }}

        await publishOps(batchOps);

        const progress = ((i + 1) / batches.length) * 100;
        this.updateState({{
          progress,
          publishedCount: this.state.publishedCount + batch.length
        }});

        // Small delay between batches
        await new Promise(resolve => setTimeout(resolve, 100));
      }}

      this.updateState({{ status: 'success' }});
      this.batchQueue = [];
{catch}  }}

",
            add_to_batch = ctx.pick("  addToBatch(data: any): void {", "  addToBatch(data) {"),
            queue_length = ctx.pick("  getQueueLength(): number {", "  getQueueLength() {"),
            clear_batch = ctx.pick("  clearBatch(): void {", "  clearBatch() {"),
            publish_batch = ctx.pick("  async publishBatch(): Promise<void> {", "  async publishBatch() {"),
            batches_type = ctx.pick(": any[][]", ""),
            ops_type = ctx.pick(": any[]", ""),
            entity = ctx.entity,
            catch = manager_catch(ctx),
        )
    }

    fn usage(&self, ctx: &FlowContext) -> String {
        let var = &ctx.var;
        usage_call(
            ctx,
            &format!(
                "publishingManager.addToBatch({var}Data1);\npublishingManager.addToBatch({var}Data2);\n"
            ),
            "publishingManager.publishBatch()",
            "Batch published",
        )
    }

    fn notes(&self, ctx: &FlowContext) -> String {
        ctx.queue_length
            .map(|n| ChunkPlan::new(n, ctx.batch_size).render())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(typed: bool, queue_length: Option<usize>) -> FlowContext {
        FlowContext {
            entity: "Post".to_string(),
            var: "post".to_string(),
            css_class: "post-publishing".to_string(),
            typed,
            validated: true,
            preview: false,
            batch_size: 10,
            queue_length,
        }
    }

    // ========================================================================
    // Chunk plan
    // ========================================================================

    #[test]
    fn test_chunk_plan_counts() {
        let plan = ChunkPlan::new(25, 10);
        assert_eq!((plan.len(), plan.full_chunks(), plan.last_chunk()), (3, 2, 5));
        let plan = ChunkPlan::new(20, 10);
        assert_eq!((plan.len(), plan.full_chunks(), plan.last_chunk()), (2, 2, 10));
        let plan = ChunkPlan::new(1, 10);
        assert_eq!((plan.len(), plan.full_chunks(), plan.last_chunk()), (1, 0, 1));
        assert!(ChunkPlan::new(0, 10).is_empty());
        assert_eq!(ChunkPlan::new(0, 10).last_chunk(), 0);
    }

    #[test]
    fn test_chunk_plan_is_ceiling_division() {
        for n in 0..60 {
            for b in 1..12 {
                let plan = ChunkPlan::new(n, b);
                assert_eq!(plan.len(), n.div_ceil(b), "n={n} b={b}");
                let covered = if plan.is_empty() {
                    0
                } else {
                    (plan.len() - 1) * b + plan.last_chunk()
                };
                assert_eq!(covered, n, "n={n} b={b}");
            }
        }
    }

    #[test]
    fn test_chunk_plan_zero_batch_size() {
        assert_eq!(ChunkPlan::new(3, 0).len(), 3);
    }

    #[test]
    fn test_chunk_plan_render() {
        let text = ChunkPlan::new(25, 10).render();
        assert!(text.contains("25 queued items at batchSize 10 -> 3 chunks"));
        assert!(text.contains("//   2 x 10 items\n"));
        assert!(text.contains("//   1 x 5 items (last chunk)\n"));
    }

    #[test]
    fn test_chunk_plan_render_even_split_has_no_last_line() {
        let text = ChunkPlan::new(20, 10).render();
        assert!(text.contains("-> 2 chunks"));
        assert!(!text.contains("last chunk"));
    }

    #[test]
    fn test_chunk_plan_render_size_is_constant() {
        let small = ChunkPlan::new(25, 1).render();
        let huge = ChunkPlan::new(usize::MAX, 1).render();
        assert_eq!(small.lines().count(), huge.lines().count());
        assert!(huge.len() < 200);
    }

    // ========================================================================
    // Fragments
    // ========================================================================

    #[test]
    fn test_react_validates_before_chunking() {
        let code = Batch.react_logic(&ctx(false, None));
        let validate = code.find("batchQueue.map(validateData)").unwrap();
        let chunk = code.find("batches.push(").unwrap();
        assert!(validate < chunk);
        assert!(code.contains("const BATCH_SIZE = 10;"));
        assert!(code.contains("setTimeout(resolve, 100)"));
        assert!(code.contains("setBatchQueue([]);"));
    }

    #[test]
    fn test_manager_fields_by_flavor() {
        assert!(Batch.manager_fields(&ctx(true, None)).contains("private batchSize: number = 10;"));
        assert!(Batch.manager_fields(&ctx(false, None)).contains("this.batchSize = 10;"));
    }

    #[test]
    fn test_manager_rejects_empty_queue() {
        let code = Batch.manager_methods(&ctx(true, None));
        assert!(code.contains("throw new Error('Batch queue is empty');"));
        assert!(code.contains("const batches: any[][] = [];"));
    }

    #[test]
    fn test_notes_only_with_queue_length() {
        assert!(Batch.notes(&ctx(true, None)).is_empty());
        assert!(Batch.notes(&ctx(true, Some(25))).contains("-> 3 chunks"));
    }
}
